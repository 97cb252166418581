//! Generator configuration.
//!
//! Read from an optional `crosscut.toml`; every field has a default, so an
//! empty file (or none at all) is a valid configuration:
//!
//! ```toml
//! output-dir = "build/generated"
//! indent-width = 4
//! header = "Generated by crosscut. Do not edit."
//! release-on-failure = true
//!
//! [markers]
//! striped-lock = "StripedLock"
//!
//! [bindings]
//! lock-registry = "com.acme.locks.Registry"
//! lock-registry-accessor = "shared"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use crosscut_emit::RenderConfig;
use crosscut_foundation::{Error, Result};
use crosscut_synthesis::{Markers, RuntimeBindings, SynthesisSettings};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// File name looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "crosscut.toml";

/// Configuration for a generator run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct GeneratorConfig {
    /// Root directory generated sources are written under.
    pub output_dir: PathBuf,

    /// Spaces per indentation level in rendered units.
    pub indent_width: usize,

    /// Comment placed at the top of every rendered unit.
    pub header: String,

    /// Run post-actions in a `finally` block so a throwing call still releases.
    pub release_on_failure: bool,

    /// Attribute names selecting declarations for each concern.
    pub markers: Markers,

    /// Runtime services generated code calls into.
    pub bindings: RuntimeBindings,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        let render = RenderConfig::default();
        Self {
            output_dir: PathBuf::from("generated"),
            indent_width: render.indent_width,
            header: render.header,
            release_on_failure: true,
            markers: Markers::default(),
            bindings: RuntimeBindings::default(),
        }
    }
}

impl GeneratorConfig {
    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the text is not valid TOML or a field has
    /// the wrong type.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).map_err(|e| Error::invalid_config(e.to_string()))?;
        config.check()?;
        Ok(config)
    }

    /// Loads a configuration file.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the file cannot be read or parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| {
            Error::invalid_config(format!("failed to read '{}': {e}", path.display()))
        })?;
        let config = Self::from_toml_str(&text).map_err(|e| {
            Error::invalid_config(format!("{}: {}", path.display(), e.kind))
        })?;
        debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Loads `path` if given, else `crosscut.toml` in `dir` if present, else
    /// the defaults.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if an explicit path is missing, or if the
    /// chosen file cannot be parsed.
    pub fn discover(path: Option<&Path>, dir: &Path) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let candidate = dir.join(DEFAULT_CONFIG_FILE);
                if candidate.is_file() {
                    Self::load(candidate)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn check(&self) -> Result<()> {
        if self.indent_width == 0 {
            return Err(Error::invalid_config("indent-width must be at least 1"));
        }
        for (kind, marker) in [
            ("striped-lock", &self.markers.striped_lock),
            ("cross-semaphore", &self.markers.cross_semaphore),
            ("scheduled", &self.markers.scheduled),
        ] {
            if marker.trim().is_empty() {
                return Err(Error::invalid_config(format!("marker `{kind}` must not be blank")));
            }
        }
        let bindings = &self.bindings;
        for (key, value) in [
            ("lock-registry", bindings.lock_registry.to_string()),
            ("lock-registry-accessor", bindings.lock_registry_accessor.clone()),
            ("semaphore-store", bindings.semaphore_store.to_string()),
            ("semaphore-store-accessor", bindings.semaphore_store_accessor.clone()),
            ("schedulable", bindings.schedulable.to_string()),
            ("schedule-task", bindings.schedule_task.to_string()),
            ("strategy", bindings.strategy.to_string()),
        ] {
            if value.trim().is_empty() {
                return Err(Error::invalid_config(format!("binding `{key}` must not be blank")));
            }
        }
        Ok(())
    }

    /// Indentation and header for the unit renderer.
    #[must_use]
    pub fn render_config(&self) -> RenderConfig {
        RenderConfig::default()
            .with_indent_width(self.indent_width)
            .with_header(self.header.clone())
    }

    /// The synthesis knobs carried by this configuration.
    #[must_use]
    pub fn settings(&self) -> SynthesisSettings {
        SynthesisSettings::default()
            .with_markers(self.markers.clone())
            .with_bindings(self.bindings.clone())
            .with_release_on_failure(self.release_on_failure)
    }

    /// Builder method to set the output directory.
    #[must_use]
    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    /// Builder method to set the indentation width.
    #[must_use]
    pub fn with_indent_width(mut self, indent_width: usize) -> Self {
        self.indent_width = indent_width;
        self
    }

    /// Builder method to set the header comment.
    #[must_use]
    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = header.into();
        self
    }

    /// Builder method to choose release-on-failure behavior.
    #[must_use]
    pub fn with_release_on_failure(mut self, release_on_failure: bool) -> Self {
        self.release_on_failure = release_on_failure;
        self
    }

    /// Builder method to set marker names.
    #[must_use]
    pub fn with_markers(mut self, markers: Markers) -> Self {
        self.markers = markers;
        self
    }

    /// Builder method to set runtime bindings.
    #[must_use]
    pub fn with_bindings(mut self, bindings: RuntimeBindings) -> Self {
        self.bindings = bindings;
        self
    }
}
