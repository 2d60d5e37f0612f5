//! Minimal CLI: generate (narrow a declaration file) | namespace (utility block only)
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use crate::catalog::ModelCatalog;
use crate::diagnostics::TracingSink;
use crate::generate::generate_file;
use crate::namespace::create_namespace;
use crate::walker::WalkOptions;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// narrow JSON and string fields of a generated Prisma client declaration file
/// to user-declared types
#[derive(Parser, Debug)]
#[command(name = "prisma-json-narrow", version)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// rewrite typed field signatures and append the utility types
    Generate(GenerateOut),
    /// print the utility type block only
    Namespace(NamespaceOut),
}

#[derive(Args, Debug, Clone)]
struct NamespaceSettings {
    /// namespace the narrowed types are declared in
    #[arg(long, default_value = "PrismaJson")]
    namespace: String,

    /// index a single namespace type instead (`<ns>.<T>["Name"]`)
    #[arg(long)]
    use_type: Option<String>,
}

#[derive(clap::Parser, Debug)]
struct GenerateOut {
    #[command(flatten)]
    namespace_settings: NamespaceSettings,

    /// generated declaration file (e.g. node_modules/.prisma/client/index.d.ts)
    #[arg(long, short)]
    declarations: PathBuf,

    /// DMMF JSON document describing the models
    #[arg(long, short)]
    models: PathBuf,

    /// output .d.ts file (rewrites `--declarations` in place if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

#[derive(clap::Parser, Debug)]
struct NamespaceOut {
    /// namespace the narrowed types are declared in
    #[arg(long, default_value = "PrismaJson")]
    namespace: String,

    /// output file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl NamespaceSettings {
    fn walk_options(&self) -> WalkOptions {
        WalkOptions {
            namespace: self.namespace.clone(),
            use_type: self.use_type.clone(),
        }
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }
    pub fn run(&self) -> Result<()> {
        match &self.cmd {
            Command::Generate(target) => {
                // debug path
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(());
                }

                // 1) catalog
                let catalog = ModelCatalog::from_path(&target.models).with_context(|| {
                    format!("could not load the model catalog from {}", target.models.display())
                })?;

                // 2) rewrite
                let options = target.namespace_settings.walk_options();
                let output = generate_file(&target.declarations, &catalog, &options, &TracingSink)
                    .with_context(|| {
                        format!(
                            "could not narrow {}; is the client generated before this step?",
                            target.declarations.display()
                        )
                    })?;

                // 3) persist
                let out = target.out.as_deref().unwrap_or(target.declarations.as_path());
                write_output(out, &output.content)?;
                tracing::info!(path = %out.display(), "wrote narrowed declarations");
                Ok(())
            }
            Command::Namespace(target) => {
                let block = create_namespace(&target.namespace);
                match &target.out {
                    Some(out) => write_output(out, &block),
                    None => {
                        println!("{block}");
                        Ok(())
                    }
                }
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn write_output(out: &Path, content: &str) -> Result<()> {
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("could not create {}", parent.display()))?;
    }
    std::fs::write(out, content).with_context(|| format!("could not write {}", out.display()))
}
