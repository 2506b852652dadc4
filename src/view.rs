//! Pure mapping from a fetched [`NeuronRecord`] to what the page shows.
//!
//! Nothing here touches the network or produces markup; the templates and
//! the JSON endpoint both consume [`NeuronView`].

use serde::Serialize;

use crate::activation::{peak_index, ColorScale, TokenWindow};
use crate::config::{Config, WindowConfig};
use crate::navigation::Navigation;
use crate::neuron::{NeuronRef, PathSegments, ALL_SOURCES};
use crate::record::{NeuronRecord, NeuroscopeText, SimilarNeuron};

pub const GRAPH_UNAVAILABLE: &str = "The Neuron to Graph data for this neuron is not available.";
pub const SIMILAR_UNAVAILABLE: &str = "Similar neuron data is not available for this neuron.";
pub const GPT4_UNAVAILABLE: &str = "The GPT-4 data for this neuron is not available.";
pub const NEUROSCOPE_UNAVAILABLE: &str =
    "The max activation dataset examples for this neuron are not available.";

/// One optional page section.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum Section<T> {
    Available(T),
    Unavailable(&'static str),
}

impl<T> Section<T> {
    fn from_option(value: Option<T>, placeholder: &'static str) -> Self {
        match value {
            Some(value) => Section::Available(value),
            None => Section::Unavailable(placeholder),
        }
    }

    pub fn available(&self) -> Option<&T> {
        match self {
            Section::Available(value) => Some(value),
            Section::Unavailable(_) => None,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct NeuronView {
    pub neuron: NeuronRef,
    pub graph: Section<String>,
    pub similar: Section<Vec<SimilarLink>>,
    pub commentary: Section<String>,
    pub navigation: Option<Navigation>,
    pub samples: Section<Vec<SampleView>>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SimilarLink {
    pub layer: u32,
    pub neuron: u32,
    pub similarity: f32,
    pub token: String,
    pub url: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TokenView {
    pub text: String,
    pub activation: f32,
    pub color: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct SampleView {
    pub index: usize,
    pub min_act: f32,
    pub max_act: f32,
    pub min_range: f32,
    pub max_range: f32,
    pub data_index: u64,
    pub max_activating_token_index: usize,
    pub length: usize,
    pub peak: Option<usize>,
    pub scale: ColorScale,
    pub window: TokenWindow,
    pub tokens: Vec<TokenView>,
}

impl SampleView {
    pub fn build(index: usize, text: &NeuroscopeText, window: WindowConfig) -> Self {
        let scale = ColorScale::from_activations(&text.activations);
        // A token without an activation (or vice versa) can't be colored.
        let tokens: Vec<TokenView> = text
            .tokens
            .iter()
            .zip(&text.activations)
            .map(|(token, &activation)| TokenView {
                text: token.clone(),
                activation,
                color: scale.color(activation),
            })
            .collect();

        let paired = &text.activations[..tokens.len()];
        let peak = peak_index(paired);
        let token_window = peak
            .map(|peak| TokenWindow::around(peak, tokens.len(), window))
            .unwrap_or_else(TokenWindow::empty);

        Self {
            index,
            min_act: text.min_act,
            max_act: text.max_act,
            min_range: text.min_range,
            max_range: text.max_range,
            data_index: text.data_index,
            max_activating_token_index: text.max_activating_token_index,
            length: text.tokens.len(),
            peak,
            scale,
            window: token_window,
            tokens,
        }
    }

    /// Tokens of the truncated strip around the peak.
    pub fn windowed(&self) -> &[TokenView] {
        &self.tokens[self.window.range()]
    }
}

impl NeuronView {
    pub fn build(neuron: &NeuronRef, record: &NeuronRecord, config: &Config) -> Self {
        let ui_prefix = config.ui_prefix();

        let graph = Section::from_option(
            record.neuron2graph.as_ref().map(|n2g| n2g.graph.clone()),
            GRAPH_UNAVAILABLE,
        );

        let similar: Section<Vec<SimilarLink>> = Section::from_option(
            record.similar.as_ref().map(|similar| {
                similar
                    .iter()
                    .map(|entry| similar_link(neuron, entry, &ui_prefix))
                    .collect()
            }),
            SIMILAR_UNAVAILABLE,
        );

        let commentary = Section::from_option(record.gpt4_markup(), GPT4_UNAVAILABLE);

        let navigation = record
            .model
            .and_then(|dims| Navigation::build(neuron, dims, &ui_prefix));

        let samples: Section<Vec<SampleView>> = Section::from_option(
            record.neuroscope.as_ref().map(|neuroscope| {
                neuroscope
                    .texts
                    .iter()
                    .enumerate()
                    .map(|(index, text)| SampleView::build(index, text, config.window))
                    .collect()
            }),
            NEUROSCOPE_UNAVAILABLE,
        );

        Self {
            neuron: neuron.clone(),
            graph,
            similar,
            commentary,
            navigation,
            samples,
        }
    }
}

fn similar_link(neuron: &NeuronRef, entry: &SimilarNeuron, ui_prefix: &str) -> SimilarLink {
    SimilarLink {
        layer: entry.layer,
        neuron: entry.neuron,
        similarity: entry.similarity,
        token: entry.token.clone(),
        url: format!(
            "{}{}",
            ui_prefix,
            neuron.at(entry.layer, entry.neuron).url_path()
        ),
    }
}

/// Shown instead of a fetch for any source other than `all`. Built from the
/// raw path so the redirect works even when the indices don't parse.
#[derive(Clone, Debug, Serialize)]
pub struct UnsupportedSource {
    pub segments: PathSegments,
    pub all_url: String,
}

impl UnsupportedSource {
    pub fn build(segments: &PathSegments, config: &Config) -> Self {
        let mut all = segments.clone();
        all.source = ALL_SOURCES.to_string();
        Self {
            segments: segments.clone(),
            all_url: format!("{}{}", config.ui_prefix(), all.url_path()),
        }
    }
}
