//! Build orchestration.
//!
//! A build moves through fixed stages and writes nothing until every
//! artifact has been produced and validated:
//!
//! ```text
//! Idle -> BuildApi -> BuildPages -> BuildComponents -> BuildSearchIndex -> Persist -> Done
//!              \___________________ (api only) ___________________/
//! ```
//!
//! Any error moves the build to `Failed`.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use folio_api::{ContractsFile, build_components, load_contracts, load_manifest};
use folio_config::Config;
use folio_renderer::Highlighter;
use folio_search::{SearchIndexDocument, build_records};
use folio_site::{
    CatalogPackage, ComponentCatalog, FsSourceLoader, PageAssembler, PageContent, PageDocument,
    PageKind, PageManifest, PreviewRegistry, Taxonomy,
};

use crate::artifacts::{
    API_PATH, ApiDocument, ApiPackage, ArtifactSet, COMPONENTS_PATH, ComponentsDocument,
    DocsManifest, MANIFEST_PATH, SEARCH_INDEX_PATH,
};
use crate::error::BuildError;
use crate::persist::{PersistMode, PersistReport, persist};
use crate::schema::{Schemas, validate};

/// Build stages, in order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuildStage {
    Idle,
    BuildApi,
    BuildPages,
    BuildComponents,
    BuildSearchIndex,
    Persist,
    Done,
    Failed,
}

impl fmt::Display for BuildStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::BuildApi => "build-api",
            Self::BuildPages => "build-pages",
            Self::BuildComponents => "build-components",
            Self::BuildSearchIndex => "build-search-index",
            Self::Persist => "persist",
            Self::Done => "done",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Options for a build.
#[derive(Clone, Copy, Debug, Default)]
pub struct BuildOptions {
    /// Compare with existing files instead of writing.
    pub check: bool,
    /// Only build `api.json`.
    pub api_only: bool,
}

/// Outcome of a successful build.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuildReport {
    /// Relative paths of every artifact, sorted.
    pub artifacts: Vec<String>,
    pub persisted: PersistReport,
}

/// Runs a build for a loaded configuration.
pub struct Builder<'a> {
    config: &'a Config,
    options: BuildOptions,
    stage: BuildStage,
}

impl<'a> Builder<'a> {
    #[must_use]
    pub fn new(config: &'a Config, options: BuildOptions) -> Self {
        Self {
            config,
            options,
            stage: BuildStage::Idle,
        }
    }

    /// Current stage.
    #[must_use]
    pub fn stage(&self) -> BuildStage {
        self.stage
    }

    /// Run every stage.
    pub fn run(&mut self) -> Result<BuildReport, BuildError> {
        match self.run_stages() {
            Ok(report) => {
                self.enter(BuildStage::Done);
                Ok(report)
            }
            Err(err) => {
                self.enter(BuildStage::Failed);
                Err(err)
            }
        }
    }

    fn enter(&mut self, stage: BuildStage) {
        tracing::info!(stage = %stage, "Build stage");
        self.stage = stage;
    }

    fn run_stages(&mut self) -> Result<BuildReport, BuildError> {
        let config = self.config;
        let schemas = Schemas::load(
            config.schemas_resolved.api.as_deref(),
            config.schemas_resolved.manifest.as_deref(),
        )?;
        let mut artifacts = ArtifactSet::new();

        self.enter(BuildStage::BuildApi);
        let api = build_api(config)?;
        let api_value = serde_json::to_value(&api).map_err(|source| BuildError::Serialize {
            path: API_PATH.to_owned(),
            source,
        })?;
        validate(&api_value, &schemas.api, API_PATH)?;
        artifacts.insert_json(API_PATH, &api_value)?;

        if !self.options.api_only {
            let manifest = load_page_manifest(&config.docs_resolved.manifest, &schemas)?;
            let assembler = PageAssembler::new(
                Arc::new(FsSourceLoader::new(&config.docs_resolved.source_dir)),
                Arc::new(Highlighter::new()),
            )
            .with_catalog(catalog(&api))
            .with_previews(PreviewRegistry::new(config.previews.clone()))
            .with_taxonomy(Taxonomy::new(&config.taxonomy));

            self.enter(BuildStage::BuildPages);
            let pages = manifest
                .pages
                .iter()
                .map(|entry| assembler.assemble(entry))
                .collect::<Result<Vec<_>, _>>()?;

            self.enter(BuildStage::BuildComponents);
            let mut component_pages = vec![assembler.assemble_components_index()?];
            component_pages.extend(assembler.assemble_component_pages()?);

            self.enter(BuildStage::BuildSearchIndex);
            let mut records = Vec::new();
            for kind in [PageKind::Docs, PageKind::Lab] {
                let of_kind: Vec<PageDocument> = pages
                    .iter()
                    .filter(|page| page.meta.kind == kind)
                    .cloned()
                    .collect();
                records.extend(build_records(&of_kind, kind));
            }
            records.extend(build_records(&component_pages, PageKind::Components));
            artifacts.insert_json(SEARCH_INDEX_PATH, &SearchIndexDocument::build(&records))?;

            add_page_artifacts(&mut artifacts, &pages, &component_pages)?;
        }

        self.enter(BuildStage::Persist);
        let mode = if self.options.check {
            PersistMode::Check
        } else {
            PersistMode::Write
        };
        let persisted = persist(&config.docs_resolved.output_dir, &artifacts, mode)?;
        tracing::info!(
            artifacts = artifacts.len(),
            written = persisted.written,
            unchanged = persisted.unchanged,
            "Build finished"
        );

        Ok(BuildReport {
            artifacts: artifacts.paths().map(str::to_owned).collect(),
            persisted,
        })
    }
}

/// Merge contracts and manifests of every configured package.
fn build_api(config: &Config) -> Result<ApiDocument, BuildError> {
    let mut packages = Vec::with_capacity(config.packages_resolved.len());
    for package in &config.packages_resolved {
        let contracts = match &package.contracts {
            Some(source) => load_contracts(&source.resolved)?,
            None => ContractsFile::default(),
        };
        let extracted = match &package.cem {
            Some(source) => load_manifest(&source.resolved)?,
            None => BTreeMap::new(),
        };
        let components = build_components(&contracts, &extracted);
        tracing::debug!(package = %package.id, components = components.len(), "Merged package");

        packages.push(ApiPackage {
            id: package.id.clone(),
            name: package.name.clone(),
            contracts: package.contracts.as_ref().map(|source| source.declared.clone()),
            cem: package.cem.as_ref().map(|source| source.declared.clone()),
            components,
        });
    }
    Ok(ApiDocument::new(packages))
}

fn catalog(api: &ApiDocument) -> ComponentCatalog {
    ComponentCatalog::new(
        api.packages
            .iter()
            .map(|package| CatalogPackage {
                id: package.id.clone(),
                name: package.name.clone(),
                components: package.components.clone(),
            })
            .collect(),
    )
}

/// Read, validate and parse the page manifest.
fn load_page_manifest(path: &Path, schemas: &Schemas) -> Result<PageManifest, BuildError> {
    let value = crate::read_json_value(path)?;
    validate(&value, &schemas.manifest, "page manifest")?;
    serde_json::from_value(value).map_err(|source| BuildError::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn add_page_artifacts(
    artifacts: &mut ArtifactSet,
    pages: &[PageDocument],
    component_pages: &[PageDocument],
) -> Result<(), BuildError> {
    let mut manifest = DocsManifest::default();
    for page in pages {
        match page.meta.kind {
            PageKind::Lab => manifest.lab_pages.push(page.meta.clone()),
            PageKind::Docs | PageKind::Components => manifest.docs_pages.push(page.meta.clone()),
        }
    }
    manifest.component_page_ids = component_pages
        .iter()
        .map(|page| page.meta.id.clone())
        .collect();
    artifacts.insert_json(MANIFEST_PATH, &manifest)?;

    let components = ComponentsDocument {
        component_pages: component_pages
            .iter()
            .map(|page| page.meta.clone())
            .collect(),
    };
    artifacts.insert_json(COMPONENTS_PATH, &components)?;

    for page in pages.iter().chain(component_pages) {
        artifacts.insert_json(
            page.content_path(),
            &PageContent {
                sections: &page.sections,
            },
        )?;
    }
    Ok(())
}
