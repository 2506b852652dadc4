use super::{escape, layout};
use super::neuron_page::{meta_row, page_title};
use crate::view::UnsupportedSource;

/// Only `/all/` pages carry a visualization; every other source points there.
pub fn unsupported_source(view: &UnsupportedSource) -> String {
    let body = format!(
        r#"        <div id="meta"><h1>{source} is not supported. Go to <a href='{all_url}'>/all/</a> to visualize everything.</h1></div>
        <table id="meta-information">
            {meta_row}
        </table>"#,
        source = escape(&view.segments.source),
        all_url = escape(&view.all_url),
        meta_row = meta_row(
            &view.segments.model,
            &view.segments.source,
            &view.segments.neuron,
            &view.segments.layer,
        ),
    );
    let title = page_title(&view.segments.model, &view.segments.layer, &view.segments.neuron);
    layout(&title, "", &body)
}

/// Plain page for requests that never reach the renderer.
pub fn error(title: &str, message: &str) -> String {
    let body = format!(
        r#"        <div id="meta"><h1>{title}</h1><div class="not_available">{message}</div></div>"#,
        title = escape(title),
        message = escape(message),
    );
    layout(title, "", &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::neuron::PathSegments;

    #[test]
    fn unsupported_source_links_to_all() {
        let view = UnsupportedSource::build(
            &PathSegments::parse("solu-1l/neuroscope/0/3"),
            &Config::default(),
        );
        let html = unsupported_source(&view);
        assert!(html.contains(
            "neuroscope is not supported. Go to <a href='/viz/solu-1l/all/0/3'>/all/</a> to visualize everything."
        ));
        assert!(!html.contains(r#"id="visualization""#));
    }

    #[test]
    fn unsupported_source_keeps_unparsed_indices() {
        let view = UnsupportedSource::build(
            &PathSegments::parse("solu-1l/neuroscope/first/<0>"),
            &Config::default(),
        );
        let html = unsupported_source(&view);
        assert!(html.contains("<a href='/viz/solu-1l/all/first/%3C0%3E'>/all/</a>"));
        assert!(html.contains("Layer index in the model (from 0)'>first</td>"));
        assert!(html.contains("Neuron index in the layer (from 0)'>&lt;0&gt;</td>"));
    }

    #[test]
    fn error_page_escapes_its_message() {
        let html = error("Not found", "No neuron at <path>");
        assert!(html.contains("No neuron at &lt;path&gt;"));
    }
}
