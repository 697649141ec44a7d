//! Render output of variant components

use crate::intensity::IntensityParameterTable;
use crate::state::ThemeState;
use crate::variant::{IntensityLevel, PresentationVariant};
use smallvec::SmallVec;

/// Theme inputs available to every component during a render pass
#[derive(Clone, Copy, Debug)]
pub struct RenderContext {
    pub variant: PresentationVariant,
    pub parameters: &'static IntensityParameterTable,
}

impl RenderContext {
    pub fn new(variant: PresentationVariant, intensity: IntensityLevel) -> Self {
        Self {
            variant,
            parameters: intensity.parameters(),
        }
    }

    pub fn from_state(state: &ThemeState) -> Self {
        Self::new(state.variant, state.intensity)
    }
}

/// Visual parameters a renderer applies to a node
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StyleHints {
    pub blur_radius: f32,
    pub fill_opacity: f32,
    pub border_alpha: f32,
    pub shadow_depth: f32,
    pub corner_radius: f32,
}

impl StyleHints {
    /// Opaque surface with a hairline border
    pub fn classic(corner_radius: f32) -> Self {
        Self {
            blur_radius: 0.0,
            fill_opacity: 1.0,
            border_alpha: 1.0,
            shadow_depth: 2.0,
            corner_radius,
        }
    }

    /// Frosted surface at rest for the given intensity
    pub fn glass(parameters: &IntensityParameterTable, corner_radius: f32) -> Self {
        Self {
            blur_radius: parameters.blur_radius,
            fill_opacity: parameters.base_opacity,
            border_alpha: parameters.border_alpha,
            shadow_depth: parameters.shadow_depth,
            corner_radius,
        }
    }
}

/// Variant-agnostic description of a mounted component
#[derive(Clone, Debug, PartialEq)]
pub struct ViewNode {
    pub capability: &'static str,
    pub implementation: &'static str,
    pub variant: PresentationVariant,
    pub style: StyleHints,
    /// Visible text, in reading order
    pub text: SmallVec<[String; 4]>,
    pub disabled: bool,
    pub children: Vec<ViewNode>,
}

impl ViewNode {
    pub fn new(
        capability: &'static str,
        implementation: &'static str,
        variant: PresentationVariant,
        style: StyleHints,
    ) -> Self {
        Self {
            capability,
            implementation,
            variant,
            style,
            text: SmallVec::new(),
            disabled: false,
            children: Vec::new(),
        }
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text.push(text.into());
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn child(mut self, child: ViewNode) -> Self {
        self.children.push(child);
        self
    }

    /// Whether any text slot of this node or its descendants contains `needle`
    pub fn contains_text(&self, needle: &str) -> bool {
        self.text.iter().any(|t| t.contains(needle))
            || self.children.iter().any(|c| c.contains_text(needle))
    }
}
