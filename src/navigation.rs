use serde::Serialize;

use crate::neuron::NeuronRef;
use crate::record::ModelDimensions;

pub const FIRST_NEURON_NOTICE: &str = "This is the first neuron in the model.";
pub const LAST_NEURON_NOTICE: &str = "This is the last neuron in the model.";

/// Where a navigation link goes, or why it goes nowhere.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum NavTarget {
    Link(String),
    Boundary(&'static str),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Navigation {
    pub model: String,
    pub previous: NavTarget,
    pub layer: String,
    pub next: NavTarget,
}

/// Coordinates of the neuron before `neuron`, crossing into the previous
/// layer when needed. `None` at the very first neuron.
pub fn previous_neuron(neuron: &NeuronRef, dims: ModelDimensions) -> Option<(u32, u32)> {
    let last_neuron = dims.neuron_per_layer.checked_sub(1)?;
    match (neuron.layer, neuron.neuron) {
        (0, 0) => None,
        (layer, 0) => Some((layer - 1, last_neuron)),
        (layer, index) => Some((layer, index - 1)),
    }
}

/// Coordinates of the neuron after `neuron`, crossing into the next layer
/// when needed. `None` at the very last neuron.
pub fn next_neuron(neuron: &NeuronRef, dims: ModelDimensions) -> Option<(u32, u32)> {
    let last_neuron = dims.neuron_per_layer.checked_sub(1)?;
    let last_layer = dims.layer_count.checked_sub(1)?;
    if neuron.layer == last_layer && neuron.neuron == last_neuron {
        None
    } else if neuron.neuron < last_neuron {
        Some((neuron.layer, neuron.neuron + 1))
    } else {
        Some((neuron.layer.saturating_add(1), 0))
    }
}

impl Navigation {
    /// Links around `neuron`. Models with an empty dimension have no
    /// meaningful neighbours, so they get no navigation row.
    pub fn build(neuron: &NeuronRef, dims: ModelDimensions, ui_prefix: &str) -> Option<Self> {
        if dims.neuron_per_layer == 0 || dims.layer_count == 0 {
            return None;
        }

        let link_to = |(layer, index): (u32, u32)| {
            NavTarget::Link(format!("{}{}", ui_prefix, neuron.at(layer, index).url_path()))
        };

        let previous = previous_neuron(neuron, dims)
            .map(link_to)
            .unwrap_or(NavTarget::Boundary(FIRST_NEURON_NOTICE));
        let next = next_neuron(neuron, dims)
            .map(link_to)
            .unwrap_or(NavTarget::Boundary(LAST_NEURON_NOTICE));

        let model_url = format!(
            "{}{}/{}",
            ui_prefix,
            urlencoding::encode(&neuron.model),
            urlencoding::encode(&neuron.source)
        );
        let layer_url = format!("{}/{}", model_url, neuron.layer);

        Some(Self {
            model: model_url,
            previous,
            layer: layer_url,
            next,
        })
    }
}
