use anyhow::{Context, Result};
use serde::Serialize;
use std::borrow::Cow;

/// The only data source that has a full visualization.
pub const ALL_SOURCES: &str = "all";

const MISSING_SEGMENT: &str = "undefined";

/// The four positional segments of a page path, before the indices are
/// checked. Missing segments read as `"undefined"`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PathSegments {
    pub model: String,
    pub source: String,
    pub layer: String,
    pub neuron: String,
}

impl PathSegments {
    /// Splits `<model>/<source>/<layer>/<neuron>` positionally. Anything
    /// after the neuron segment, including a trailing slash, is ignored.
    pub fn parse(rest: &str) -> Self {
        let mut segments = rest.split('/').map(decode_segment);
        let mut next = || {
            segments
                .next()
                .unwrap_or(Cow::Borrowed(MISSING_SEGMENT))
                .into_owned()
        };
        Self {
            model: next(),
            source: next(),
            layer: next(),
            neuron: next(),
        }
    }

    pub fn is_all_sources(&self) -> bool {
        self.source == ALL_SOURCES
    }

    /// The indices must be unsigned integers.
    pub fn neuron_ref(&self) -> Result<NeuronRef> {
        let layer: u32 = self
            .layer
            .parse()
            .with_context(|| format!("Invalid layer index '{}'", self.layer))?;
        let neuron: u32 = self
            .neuron
            .parse()
            .with_context(|| format!("Invalid neuron index '{}'", self.neuron))?;
        Ok(NeuronRef {
            model: self.model.clone(),
            source: self.source.clone(),
            layer,
            neuron,
        })
    }

    /// `<model>/<source>/<layer>/<neuron>` with every segment percent-encoded.
    pub fn url_path(&self) -> String {
        format!(
            "{}/{}/{}/{}",
            urlencoding::encode(&self.model),
            urlencoding::encode(&self.source),
            urlencoding::encode(&self.layer),
            urlencoding::encode(&self.neuron)
        )
    }
}

/// Identifies the neuron a page is about.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NeuronRef {
    pub model: String,
    pub source: String,
    pub layer: u32,
    pub neuron: u32,
}

impl NeuronRef {
    pub fn new(model: impl Into<String>, source: impl Into<String>, layer: u32, neuron: u32) -> Self {
        Self {
            model: model.into(),
            source: source.into(),
            layer,
            neuron,
        }
    }

    /// Same neuron, different coordinates. Used for navigation links.
    pub fn at(&self, layer: u32, neuron: u32) -> Self {
        Self {
            model: self.model.clone(),
            source: self.source.clone(),
            layer,
            neuron,
        }
    }

    /// `<model>/<source>/<layer>/<neuron>` with every segment percent-encoded.
    pub fn url_path(&self) -> String {
        format!(
            "{}/{}/{}/{}",
            urlencoding::encode(&self.model),
            urlencoding::encode(&self.source),
            self.layer,
            self.neuron
        )
    }
}

fn decode_segment(segment: &str) -> Cow<'_, str> {
    urlencoding::decode(segment).unwrap_or(Cow::Borrowed(segment))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_positional_segments() {
        let segments = PathSegments::parse("solu-1l/all/0/42");
        assert!(segments.is_all_sources());
        assert_eq!(segments.neuron_ref().unwrap(), NeuronRef::new("solu-1l", "all", 0, 42));
    }

    #[test]
    fn ignores_trailing_segments() {
        let neuron = PathSegments::parse("gpt2-small/neuroscope/3/7/extra")
            .neuron_ref()
            .unwrap();
        assert_eq!(neuron, NeuronRef::new("gpt2-small", "neuroscope", 3, 7));
    }

    #[test]
    fn decodes_percent_encoded_names() {
        let neuron = PathSegments::parse("my%20model/all/1/2").neuron_ref().unwrap();
        assert_eq!(neuron.model, "my model");
        assert_eq!(neuron.url_path(), "my%20model/all/1/2");
    }

    #[test]
    fn rejects_non_numeric_indices() {
        assert!(PathSegments::parse("solu-1l/all/first/0").neuron_ref().is_err());
        assert!(PathSegments::parse("solu-1l/all/0/-1").neuron_ref().is_err());
    }

    #[test]
    fn missing_indices_are_rejected() {
        let err = PathSegments::parse("solu-1l/all").neuron_ref().unwrap_err();
        assert!(format!("{:#}", err).contains("undefined"));
    }

    #[test]
    fn missing_segments_read_as_undefined() {
        let segments = PathSegments::parse("solu-1l");
        assert_eq!(segments.model, "solu-1l");
        assert_eq!(segments.source, "undefined");
        assert_eq!(segments.layer, "undefined");
        assert_eq!(segments.neuron, "undefined");
    }

    #[test]
    fn trailing_slash_is_ignored() {
        let segments = PathSegments::parse("solu-1l/all/0/5/");
        assert_eq!(segments.neuron_ref().unwrap(), NeuronRef::new("solu-1l", "all", 0, 5));
    }

    #[test]
    fn raw_segments_keep_non_numeric_indices() {
        let segments = PathSegments::parse("solu-1l/neuroscope/first/0");
        assert!(!segments.is_all_sources());
        assert!(segments.neuron_ref().is_err());
        assert_eq!(segments.url_path(), "solu-1l/neuroscope/first/0");
    }

    #[test]
    fn at_keeps_model_and_source() {
        let neuron = NeuronRef::new("solu-2l", "all", 1, 5);
        assert_eq!(neuron.at(0, 9), NeuronRef::new("solu-2l", "all", 0, 9));
    }
}
