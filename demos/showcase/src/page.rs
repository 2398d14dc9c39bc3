//! Page description: the sections to show and optional policy overrides

use std::path::Path;

use serde::{Deserialize, Serialize};
use tui_carousel::{ResponsivePolicy, Section, SectionVariant, SettingsError, Slide, SlideButton};
use tui_carousel::LinkTarget;

/// Replacement policies per variant. Missing entries keep the variant's own.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PolicyOverrides {
    #[serde(default)]
    pub default: Option<ResponsivePolicy>,
    #[serde(default)]
    pub custom: Option<ResponsivePolicy>,
}

/// A page of carousel sections, as loaded from `--page`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DemoPage {
    pub sections: Vec<Section>,
    #[serde(default)]
    pub policies: PolicyOverrides,
}

impl DemoPage {
    /// Read, parse and validate a page file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let page: Self = serde_json::from_str(json)?;
        page.validate()?;
        Ok(page)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.sections.is_empty() {
            return Err(SettingsError::Invalid("page has no sections".into()));
        }
        for policy in [&self.policies.default, &self.policies.custom]
            .into_iter()
            .flatten()
        {
            policy.validate()?;
        }
        Ok(())
    }

    /// Policy a section of `variant` should use on this page.
    pub fn policy_for(&self, variant: SectionVariant) -> ResponsivePolicy {
        let overridden = match variant {
            SectionVariant::Default => &self.policies.default,
            SectionVariant::Custom => &self.policies.custom,
        };
        overridden.clone().unwrap_or_else(|| variant.policy())
    }

    /// The stock page: the same six slides in a default and a custom section.
    pub fn builtin() -> Self {
        let slides = builtin_slides();
        Self {
            sections: vec![
                Section {
                    variant: SectionVariant::Default,
                    title: Some("Carousel default".into()),
                    copy: Some(
                        "<p>Arrows and dots come with the carousel. Three slides on wide screens, two on tablets, one on phones.</p>"
                            .into(),
                    ),
                    slides: slides.clone(),
                },
                Section {
                    variant: SectionVariant::Custom,
                    title: Some("Carousel custom".into()),
                    copy: Some(
                        "<p>Controls are drawn by the section. Loops, and fades on small screens.</p>"
                            .into(),
                    ),
                    slides,
                },
            ],
            policies: PolicyOverrides::default(),
        }
    }
}

fn builtin_slides() -> Vec<Slide> {
    const TITLES: [&str; 6] = [
        "Harbour lights",
        "Old town",
        "Coastal path",
        "Market day",
        "Hill fort",
        "Night train",
    ];
    TITLES
        .iter()
        .enumerate()
        .map(|(i, title)| {
            let target = if i == TITLES.len() - 1 {
                LinkTarget::Blank
            } else {
                LinkTarget::SameFrame
            };
            Slide::new(format!("slide-{}", i + 1))
                .with_title(*title)
                .with_image(format!("https://picsum.photos/seed/{}/600/400", i + 1))
                .with_description(format!(
                    "<p>Slide {} of {}. Lorem ipsum dolor sit amet, consectetur adipiscing elit.</p>",
                    i + 1,
                    TITLES.len()
                ))
                .with_button(SlideButton {
                    link_text: None,
                    link_url: Some("#".into()),
                    target,
                })
        })
        .collect()
}
