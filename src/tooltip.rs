//! Hover tooltip shared by every element that carries a `data-tooltip`
//! attribute.

use serde::Serialize;

pub const TOOLTIP_ATTRIBUTE: &str = "data-tooltip";
pub const TOOLTIP_ELEMENT_ID: &str = "tooltip";

/// Pixels between the pointer and the tooltip's top-left corner, per axis.
pub const POINTER_OFFSET_PX: i32 = 10;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum TooltipState {
    #[default]
    Hidden,
    Shown { left: i32, top: i32, text: String },
}

impl TooltipState {
    /// Applies one pointer move. `hovered` is the tooltip text of the
    /// element under the pointer, if it has one.
    pub fn pointer_moved(&mut self, hovered: Option<&str>, page_x: i32, page_y: i32) -> &Self {
        *self = match hovered {
            Some(text) => TooltipState::Shown {
                left: page_x.saturating_add(POINTER_OFFSET_PX),
                top: page_y.saturating_add(POINTER_OFFSET_PX),
                text: text.to_string(),
            },
            None => TooltipState::Hidden,
        };
        self
    }

    pub fn is_shown(&self) -> bool {
        matches!(self, TooltipState::Shown { .. })
    }
}

/// Browser side of [`TooltipState::pointer_moved`], installed once per page.
pub fn script() -> String {
    format!(
        r#"(() => {{
  const tooltip = document.getElementById("{id}");
  document.addEventListener("mousemove", (e) => {{
    const target = e.target;
    if (target instanceof Element && target.hasAttribute("{attr}")) {{
      tooltip.style.left = e.pageX + {offset} + "px";
      tooltip.style.top = e.pageY + {offset} + "px";
      tooltip.style.display = "block";
      tooltip.textContent = target.getAttribute("{attr}");
    }} else {{
      tooltip.style.display = "none";
    }}
  }});
}})();"#,
        id = TOOLTIP_ELEMENT_ID,
        attr = TOOLTIP_ATTRIBUTE,
        offset = POINTER_OFFSET_PX,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shows_next_to_the_pointer() {
        let mut tooltip = TooltipState::default();
        tooltip.pointer_moved(Some(" the\n0.42"), 100, 250);
        assert_eq!(
            tooltip,
            TooltipState::Shown {
                left: 110,
                top: 260,
                text: " the\n0.42".to_string()
            }
        );
    }

    #[test]
    fn hides_when_leaving_a_tooltip_element() {
        let mut tooltip = TooltipState::default();
        tooltip.pointer_moved(Some("Layer index"), 0, 0);
        assert!(tooltip.is_shown());
        assert!(!tooltip.pointer_moved(None, 5, 5).is_shown());
    }

    #[test]
    fn follows_the_pointer_between_moves() {
        let mut tooltip = TooltipState::default();
        tooltip.pointer_moved(Some("a"), 1, 1);
        let state = tooltip.pointer_moved(Some("b"), 40, 2).clone();
        assert_eq!(
            state,
            TooltipState::Shown { left: 50, top: 12, text: "b".to_string() }
        );
    }

    #[test]
    fn script_uses_the_same_offset_and_attribute() {
        let js = script();
        assert!(js.contains("e.pageX + 10"));
        assert!(js.contains(r#"hasAttribute("data-tooltip")"#));
        assert!(js.contains(r#"getElementById("tooltip")"#));
    }
}
