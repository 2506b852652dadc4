pub mod neuron_page;
pub mod notice_page;

use crate::tooltip;

pub fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Page shell shared by every view: stylesheet, tooltip element and the
/// tooltip script. `head_extra` lands at the end of `<head>`.
fn layout(title: &str, head_extra: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} — neuroviz</title>
    <style>
        *, *::before, *::after {{ box-sizing: border-box; }}
        body {{
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', 'Inter', system-ui, sans-serif;
            color: #111827; background: #ffffff; margin: 0;
            -webkit-font-smoothing: antialiased;
        }}
        .page {{ max-width: 960px; margin: 0 auto; padding: 2rem 1.25rem 4rem; }}
        h1 {{ font-size: 1.25rem; }}
        a {{ color: #2563eb; }}

        #tooltip {{
            position: absolute; display: none; z-index: 10; pointer-events: none;
            white-space: pre; font-size: 0.75rem; padding: 0.25rem 0.5rem;
            background: #111827; color: #f9fafb; border-radius: 4px;
        }}

        #meta-information {{ border-collapse: collapse; margin-bottom: 1.5rem; }}
        .meta-data {{ border: 1px solid #d8dce3; padding: 0.375rem 0.75rem; font-size: 0.8125rem; }}
        .meta-data.first {{ font-weight: 600; }}

        .section {{ margin-bottom: 1.5rem; }}
        .section-title {{
            font-size: 0.6875rem; font-weight: 600; text-transform: uppercase;
            letter-spacing: 0.05em; color: #9ca3af;
        }}
        .not_available {{ color: #9ca3af; font-size: 0.8125rem; font-style: italic; }}
        .similar_neurons {{ display: inline-block; margin: 0 0.75rem 0.375rem 0; font-size: 0.8125rem; }}
        #n2g svg {{ max-width: 100%; height: auto; }}

        .text-title {{ font-size: 1rem; margin: 1.5rem 0 0.5rem; }}
        .meta-info {{ display: block; font-size: 0.75rem; font-weight: 400; color: #4b5563; }}
        .token_string, .content {{ font-family: 'SF Mono', 'Fira Code', Menlo, monospace; font-size: 0.8125rem; line-height: 1.6; }}
        .token {{ white-space: pre-wrap; border-radius: 2px; }}
        .collapsible {{
            margin: 0.5rem 0; padding: 0.25rem 0.5rem; font-size: 0.75rem; cursor: pointer;
            background: #f7f8fa; border: 1px solid #d8dce3; border-radius: 4px;
        }}
        .collapsible.active {{ background: #e8ebf0; }}
        .content {{ max-height: 0; overflow: hidden; transition: max-height 0.2s ease-out; }}
    </style>
    {head_extra}
</head>
<body>
    <div id="tooltip"></div>
    <div class="page">
{body}
    </div>
    <script>{tooltip_script}</script>
</body>
</html>"#,
        title = escape(title),
        head_extra = head_extra,
        body = body,
        tooltip_script = tooltip::script(),
    )
}
