/*
 * plugin.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Bundler plugin surface for the import transform.
 */

//! Bundler plugin surface.
//!
//! The bundler registers plugins against a [`WorkflowContext`], asks each
//! one whether it handles a file, and hands matching files over together
//! with their token stream and parse tree.

use std::collections::BTreeSet;

use fusion_ast::{Ast, Token};

use crate::Result;
use crate::config::{FusionConfig, FusionOptions};
use crate::rewrite::{ImportLowering, RequireLowering};
use crate::transform::{SourceFile, TransformResult, transform_file};

/// Bundler state that plugins register with.
#[derive(Debug, Clone, Default)]
pub struct WorkflowContext {
    allowed_extensions: BTreeSet<String>,
}

impl WorkflowContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Let files with `ext` into the build.
    pub fn allow_extension(&mut self, ext: &str) {
        self.allowed_extensions.insert(ext.to_string());
    }

    pub fn is_extension_allowed(&self, ext: &str) -> bool {
        self.allowed_extensions.contains(ext)
    }

    pub fn allowed_extensions(&self) -> impl Iterator<Item = &str> {
        self.allowed_extensions.iter().map(String::as_str)
    }
}

/// A bundler plugin.
///
/// Plugins must be `Send + Sync` so the bundler can transform files on
/// several threads.
pub trait Plugin: Send + Sync {
    /// Human-readable name for this plugin.
    fn name(&self) -> &str;

    /// Whether the plugin handles the file at `path`.
    fn test(&self, path: &str) -> bool;

    /// Register with the bundler before any file is processed.
    fn init(&self, ctx: &mut WorkflowContext);
}

/// Lowers ES imports and emits an identity source map per file.
pub struct FusionPlugin {
    config: FusionConfig,
    lowering: Box<dyn ImportLowering>,
}

impl FusionPlugin {
    /// Plugin with the given configuration, lowering to `require` calls.
    pub fn new(config: FusionConfig) -> Self {
        FusionPlugin {
            config,
            lowering: Box::new(RequireLowering),
        }
    }

    pub fn from_options(options: &FusionOptions) -> Result<Self> {
        Ok(Self::new(FusionConfig::from_options(options)?))
    }

    /// Use `lowering` to build import replacements.
    pub fn with_lowering(mut self, lowering: impl ImportLowering + 'static) -> Self {
        self.lowering = Box::new(lowering);
        self
    }

    pub fn config(&self) -> &FusionConfig {
        &self.config
    }

    /// Transform one file the bundler routed to this plugin.
    ///
    /// Rewrites the file's import declarations in `ast` and returns the
    /// file's source map with the regeneration state.
    pub fn transform(
        &self,
        file: &SourceFile,
        tokens: &[Token],
        ast: &mut Ast,
    ) -> Result<TransformResult> {
        transform_file(file, tokens, ast, self.lowering.as_ref())
    }
}

impl Default for FusionPlugin {
    fn default() -> Self {
        Self::new(FusionConfig::default())
    }
}

impl std::fmt::Debug for FusionPlugin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FusionPlugin")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Plugin for FusionPlugin {
    fn name(&self) -> &str {
        "fusion"
    }

    fn test(&self, path: &str) -> bool {
        self.config.matches(path)
    }

    fn init(&self, ctx: &mut WorkflowContext) {
        tracing::debug!(ext = self.config.extension(), "Registering extension");
        ctx.allow_extension(self.config.extension());
    }
}
