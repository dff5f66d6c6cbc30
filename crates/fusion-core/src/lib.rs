//! Import lowering and identity source maps for the fusion bundler plugin
//!
//! For every file the bundler routes here, the plugin rewrites ES import
//! declarations into the loader's lowered form and builds a version 3
//! source map from the file's original tokens.
//!
//! # Architecture
//!
//! - [`token_mapper`] - token stream to source map (no tree access)
//! - [`rewrite`] - import declaration substitution (no map access)
//! - [`transform`] - the per-file driver running both
//! - [`plugin`] / [`config`] - bundler registration and options
//!
//! # Example
//!
//! ```
//! use fusion_ast::{Ast, ImportSpecifier, Node, Span, Token, TokenKind};
//! use fusion_core::{FusionPlugin, SourceFile};
//!
//! let file = SourceFile::new("main.js", "import { x } from \"./m\";");
//!
//! let mut ast = Ast::for_source(&file.contents);
//! let source = ast.alloc(Node::StringLiteral { value: "./m".into() }, Some(Span::new(18, 23)));
//! let import = ast.alloc(
//!     Node::ImportDeclaration { specifiers: vec![ImportSpecifier::named("x")], source },
//!     Some(Span::new(0, 24)),
//! );
//! ast.push_statement(import);
//!
//! let tokens = vec![
//!     Token::new(TokenKind::Keyword, Some("import".into()), 0, 6),
//!     Token::name("x", 9),
//!     Token::eof(24),
//! ];
//!
//! let result = FusionPlugin::default().transform(&file, &tokens, &mut ast).unwrap();
//! assert!(result.requires_regeneration());
//! assert_eq!(
//!     fusion_ast::regenerate(&ast, &file.contents),
//!     "const { x } = require(\"./m\");"
//! );
//! ```

pub mod config;
pub mod error;
pub mod plugin;
pub mod rewrite;
pub mod token_mapper;
pub mod transform;

// Re-export commonly used types
pub use config::{FusionConfig, FusionOptions};
pub use error::{FusionError, Result};
pub use plugin::{FusionPlugin, Plugin, WorkflowContext};
pub use rewrite::{
    ImportLowering, Lowered, NotApplicable, PendingRewrite, RequireLowering, RewriteOutcome,
    lower_import, rewrite_import,
};
pub use token_mapper::{build_mapping_table, build_source_map};
pub use transform::{SourceFile, TransformResult, TransformState, transform_file};
