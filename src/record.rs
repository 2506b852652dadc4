use serde::{Deserialize, Serialize};

/// Everything the neuron API knows about one neuron. Every section may be
/// missing (or `null`) independently of the others.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct NeuronRecord {
    #[serde(default)]
    pub neuron2graph: Option<Neuron2Graph>,
    #[serde(default)]
    pub similar: Option<Vec<SimilarNeuron>>,
    /// Free-form commentary, injected into the page as-is.
    #[serde(default, rename = "gpt-4")]
    pub gpt4: Option<serde_json::Value>,
    #[serde(default)]
    pub model: Option<ModelDimensions>,
    #[serde(default)]
    pub neuroscope: Option<Neuroscope>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Neuron2Graph {
    /// Graphviz DOT source.
    pub graph: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimilarNeuron {
    pub layer: u32,
    pub neuron: u32,
    pub similarity: f32,
    #[serde(default)]
    pub token: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelDimensions {
    pub neuron_per_layer: u32,
    pub layer_count: u32,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Neuroscope {
    #[serde(default)]
    pub texts: Vec<NeuroscopeText>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct NeuroscopeText {
    #[serde(default)]
    pub tokens: Vec<String>,
    #[serde(default)]
    pub activations: Vec<f32>,
    #[serde(default)]
    pub min_act: f32,
    #[serde(default)]
    pub max_act: f32,
    #[serde(default)]
    pub min_range: f32,
    #[serde(default)]
    pub max_range: f32,
    #[serde(default)]
    pub data_index: u64,
    #[serde(default)]
    pub max_activating_token_index: usize,
}

impl NeuronRecord {
    /// Commentary as page markup: strings verbatim, anything else as JSON text.
    pub fn gpt4_markup(&self) -> Option<String> {
        self.gpt4.as_ref().and_then(|value| match value {
            serde_json::Value::Null => None,
            serde_json::Value::String(text) => Some(text.clone()),
            other => Some(other.to_string()),
        })
    }
}
