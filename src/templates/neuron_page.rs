use std::fmt::Display;

use super::{escape, layout};
use crate::navigation::{NavTarget, Navigation};
use crate::tooltip::TOOLTIP_ATTRIBUTE;
use crate::view::{NeuronView, SampleView, Section, SimilarLink, TokenView};

const COLLAPSIBLE_SCRIPT: &str = r#"document.querySelectorAll(".collapsible").forEach((button) => {
  button.addEventListener("click", function () {
    this.classList.toggle("active");
    const content = this.nextElementSibling;
    if (content.style.maxHeight) {
      content.style.maxHeight = null;
    } else {
      content.style.maxHeight = content.scrollHeight + "px";
    }
  });
});"#;

const GRAPH_SCRIPT: &str = r#"(() => {
  const source = document.getElementById("n2g-source");
  if (!source || typeof Viz === "undefined") return;
  Viz.instance().then((viz) => {
    document.getElementById("n2g").appendChild(viz.renderSVGElement(source.textContent));
  });
})();"#;

pub fn render(view: &NeuronView, viz_js_url: &str) -> String {
    let graph_section = match &view.graph {
        Section::Available(dot) => format!(
            r#"<pre id="n2g-source" hidden>{}</pre>"#,
            escape(dot)
        ),
        Section::Unavailable(notice) => not_available(notice),
    };

    let similar_section = match &view.similar {
        Section::Available(links) => links.iter().map(similar_link).collect::<String>(),
        Section::Unavailable(notice) => not_available(notice),
    };

    let commentary_section = match &view.commentary {
        Section::Available(markup) => format!(r#"<div class="gpt4">{}</div>"#, markup),
        Section::Unavailable(notice) => not_available(notice),
    };

    let (samples, neuroscope_notice) = match &view.samples {
        Section::Available(samples) => (samples.iter().map(sample).collect::<String>(), String::new()),
        Section::Unavailable(notice) => (String::new(), not_available(notice)),
    };

    let navigation_row = view.navigation.as_ref().map(navigation_row).unwrap_or_default();

    let body = format!(
        r#"        <div id="meta"></div>
        <table id="meta-information">
            {meta_row}
            {navigation_row}
        </table>

        <div class="section">
            <div class="section-title">Neuron to Graph</div>
            <div id="n2g">{graph_section}</div>
        </div>

        <div class="section">
            <div class="section-title">Similar neurons</div>
            <div id="similar">{similar_section}</div>
        </div>

        <div class="section">
            <div class="section-title">GPT-4 explanation</div>
            <div id="gpt4">{commentary_section}</div>
        </div>

        <div class="section">
            <div class="section-title">Max activating dataset examples</div>
            <div id="neuroscope">{neuroscope_notice}</div>
            <div id="visualization">{samples}</div>
        </div>

        <script>{graph_script}</script>
        <script>{collapsible_script}</script>"#,
        meta_row = meta_row(
            &view.neuron.model,
            &view.neuron.source,
            view.neuron.neuron,
            view.neuron.layer,
        ),
        navigation_row = navigation_row,
        graph_section = graph_section,
        similar_section = similar_section,
        commentary_section = commentary_section,
        neuroscope_notice = neuroscope_notice,
        samples = samples,
        graph_script = if view.graph.available().is_some() { GRAPH_SCRIPT } else { "" },
        collapsible_script = COLLAPSIBLE_SCRIPT,
    );

    let head_extra = if view.graph.available().is_some() {
        format!(r#"<script src="{}"></script>"#, escape(viz_js_url))
    } else {
        String::new()
    };

    layout(
        &page_title(&view.neuron.model, view.neuron.layer, view.neuron.neuron),
        &head_extra,
        &body,
    )
}

pub fn page_title(model: &str, layer: impl Display, neuron: impl Display) -> String {
    format!("{} L{} N{}", model, layer, neuron)
}

fn not_available(notice: &str) -> String {
    format!(r#"<div class="not_available">{}</div>"#, escape(notice))
}

pub(super) fn meta_row(model: &str, source: &str, neuron: impl Display, layer: impl Display) -> String {
    format!(
        "<tr>\
<td class='meta-data first' {attr}='The model name'>{model}</td>\
<td class='meta-data' {attr}='The data source (all includes\n all available sources)'>{source}</td>\
<td class='meta-data' {attr}='Neuron index in the layer (from 0)'>{neuron}</td>\
<td class='meta-data' {attr}='Layer index in the model (from 0)'>{layer}</td>\
</tr>",
        attr = TOOLTIP_ATTRIBUTE,
        model = escape(model),
        source = escape(source),
        neuron = escape(&neuron.to_string()),
        layer = escape(&layer.to_string()),
    )
}

fn navigation_row(nav: &Navigation) -> String {
    format!(
        "<tr>\
<td class='meta-data' {attr}='Visit the current model page'><a href='{model}'>Model</a></td>\
<td class='meta-data first' {attr}='Visit the previous neuron page'>{previous}</td>\
<td class='meta-data' {attr}='Visit the current layer page'><a href='{layer}'>Layer</a></td>\
<td class='meta-data' {attr}='Visit the next neuron page'>{next}</td>\
</tr>",
        attr = TOOLTIP_ATTRIBUTE,
        model = escape(&nav.model),
        previous = nav_link(&nav.previous, "Previous"),
        layer = escape(&nav.layer),
        next = nav_link(&nav.next, "Next"),
    )
}

fn nav_link(target: &NavTarget, label: &str) -> String {
    match target {
        NavTarget::Link(url) => format!("<a href='{}'>{}</a>", escape(url), label),
        NavTarget::Boundary(notice) => format!(
            "<a href='#' class='boundary' data-notice='{}' onclick='alert(this.dataset.notice); return false;'>{}</a>",
            escape(notice),
            label
        ),
    }
}

fn similar_link(link: &SimilarLink) -> String {
    format!(
        "<a class='similar_neurons' href='{url}'>{layer}:{neuron} \
<span {attr}='The similarity score to\nthis neuron'>E{similarity}</span> \
<span {attr}='The token this neuron\nactivates the most to'>{token}</span></a>",
        url = escape(&link.url),
        layer = link.layer,
        neuron = link.neuron,
        similarity = link.similarity,
        token = escape(&link.token),
        attr = TOOLTIP_ATTRIBUTE,
    )
}

fn token_span(token: &TokenView) -> String {
    format!(
        r#"<span class="token" style="background-color: {color}" {attr}="{tooltip}">{text}</span>"#,
        color = token.color,
        attr = TOOLTIP_ATTRIBUTE,
        tooltip = escape(&format!("{}\n{}", token.text, token.activation)),
        text = escape(&token.text),
    )
}

fn sample(sample: &SampleView) -> String {
    let header = format!(
        "<h2 class='text-title'>Text {index}<span class='meta-info'>{min_act} to {max_act} activation within the range {min_range} to {max_range}. \
Data index {data_index}. Max activating token located at index {peak} of the text of length {length}.</span></h2>",
        index = sample.index,
        min_act = sample.min_act,
        max_act = sample.max_act,
        min_range = sample.min_range,
        max_range = sample.max_range,
        data_index = sample.data_index,
        peak = sample.max_activating_token_index,
        length = sample.length,
    );

    let token_string = format!(
        r#"<div class="token_string" id="token_string_{}">{}</div>"#,
        sample.index,
        sample.windowed().iter().map(token_span).collect::<String>()
    );

    let full_text = format!(
        r#"<button class="collapsible">💬 Show all tokens in sample</button><div class="content">{}</div>"#,
        sample.tokens.iter().map(token_span).collect::<String>()
    );

    [header, token_string, full_text].concat()
}
