/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Emission driver.
//!
//! Renders every artifact for every message of every dialect and writes the
//! results below the output directory. All rendering happens before the first
//! write, so a schema or template defect never leaves a partially regenerated
//! tree behind.

use crate::artifact::{ArtifactSpec, Scope};
use crate::template::Context;
use crate::transform::transform;
use crate::typemap::TypeMap;
use crate::ue4;
use mavforge_core::error::{GenError, Result, SchemaError};
use mavforge_dialect::Dialect;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Configuration for code generation.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Root of the generated tree.
    pub output_dir: PathBuf,
    /// Module directory relative to `output_dir`.
    pub module_path: PathBuf,
    /// Whether to drop one leading newline from rendered files.
    pub trim_leading_newline: bool,
    /// Whether to emit the per-dialect dispatch header.
    pub emit_dispatch: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            module_path: PathBuf::from(ue4::MODULE_PATH),
            trim_leading_newline: true,
            emit_dispatch: false,
        }
    }
}

impl GeneratorConfig {
    /// Creates a configuration writing below `output_dir`.
    #[must_use]
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            ..Self::default()
        }
    }

    /// Sets the module directory relative to the output directory.
    #[must_use]
    pub fn with_module_path(mut self, module_path: impl Into<PathBuf>) -> Self {
        self.module_path = module_path.into();
        self
    }

    /// Sets whether one leading newline is dropped from rendered files.
    #[must_use]
    pub const fn with_trim_leading_newline(mut self, trim: bool) -> Self {
        self.trim_leading_newline = trim;
        self
    }

    /// Sets whether the dispatch header is emitted.
    #[must_use]
    pub const fn with_dispatch(mut self, emit: bool) -> Self {
        self.emit_dispatch = emit;
        self
    }

    /// Returns the module directory.
    #[must_use]
    pub fn module_dir(&self) -> PathBuf {
        self.output_dir.join(&self.module_path)
    }
}

/// Summary of a completed generation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    /// Directories ensured, in creation order.
    pub directories: Vec<PathBuf>,
    /// Files written, in write order.
    pub files: Vec<PathBuf>,
}

/// One rendered file waiting to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PlannedFile {
    path: PathBuf,
    contents: String,
}

/// In-memory result of rendering a whole run.
#[derive(Debug, Default)]
struct Plan {
    directories: Vec<PathBuf>,
    files: Vec<PlannedFile>,
}

/// Code generator for MAVLink dialects.
#[derive(Debug)]
pub struct CodeGenerator {
    config: GeneratorConfig,
    types: TypeMap,
    artifacts: Vec<ArtifactSpec>,
}

impl CodeGenerator {
    /// Creates a generator with the standard type table and the built-in
    /// Unreal Engine artifacts.
    ///
    /// # Errors
    /// Returns an error if a built-in template fails to parse.
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        let artifacts = ue4::artifacts(config.emit_dispatch)?;
        Ok(Self::with_artifacts(config, TypeMap::ue4(), artifacts))
    }

    /// Creates a generator with explicit types and artifacts.
    #[must_use]
    pub fn with_artifacts(
        config: GeneratorConfig,
        types: TypeMap,
        artifacts: Vec<ArtifactSpec>,
    ) -> Self {
        Self {
            config,
            types,
            artifacts,
        }
    }

    /// Replaces the type mapping table.
    #[must_use]
    pub fn with_types(mut self, types: TypeMap) -> Self {
        self.types = types;
        self
    }

    /// Replaces the content template of the artifact of the given kind.
    ///
    /// Returns `Ok(false)` if no artifact of that kind is configured.
    ///
    /// # Errors
    /// Returns an error if the template fails to parse.
    pub fn override_template(&mut self, kind: &str, template: &str) -> Result<bool> {
        let Some(index) = self.artifacts.iter().position(|a| a.kind() == kind) else {
            return Ok(false);
        };
        let spec = self.artifacts[index].clone().with_template(template)?;
        self.artifacts[index] = spec;
        Ok(true)
    }

    /// Returns the configured artifacts.
    #[must_use]
    pub fn artifacts(&self) -> &[ArtifactSpec] {
        &self.artifacts
    }

    /// Generates all artifacts for the given dialects.
    ///
    /// Existing files at the output paths are overwritten.
    ///
    /// # Errors
    /// Returns the first schema, template or I/O error; the run is aborted.
    pub fn generate(&self, dialects: &[Dialect]) -> Result<GenerationReport> {
        let plan = self.plan(dialects)?;
        info!(
            dialects = dialects.len(),
            files = plan.files.len(),
            "rendered artifacts"
        );
        self.write(plan)
    }

    /// Renders every artifact in memory without touching the file system.
    fn plan(&self, dialects: &[Dialect]) -> Result<Plan> {
        let mut plan = Plan::default();
        let mut seen = HashSet::new();
        let module_dir = self.config.module_dir();

        for (index, dialect) in dialects.iter().enumerate() {
            dialect.check()?;
            let view = transform(dialect, index, &self.types)?;
            debug!(
                dialect = %dialect.basename,
                messages = view.messages().len(),
                "transformed dialect"
            );

            for spec in &self.artifacts {
                let dir = module_dir.join(spec.directory()).join(view.basename());
                if !plan.directories.contains(&dir) {
                    plan.directories.push(dir.clone());
                }

                match spec.scope() {
                    Scope::Dialect => {
                        let file = self.render(spec, &dir, &view)?;
                        Self::push_unique(&mut plan, &mut seen, file)?;
                    }
                    Scope::Message => {
                        for message in view.messages() {
                            let file = self.render(spec, &dir, message)?;
                            Self::push_unique(&mut plan, &mut seen, file)?;
                        }
                    }
                }
            }
        }

        Ok(plan)
    }

    fn render(&self, spec: &ArtifactSpec, dir: &Path, ctx: &dyn Context) -> Result<PlannedFile> {
        let file_name = spec.render_file_name(ctx)?;
        let mut contents = spec.render_contents(ctx)?;
        if self.config.trim_leading_newline && contents.starts_with('\n') {
            contents.remove(0);
        }
        Ok(PlannedFile {
            path: dir.join(file_name),
            contents,
        })
    }

    /// Paths are compared case-insensitively so the output set is the same on
    /// case-folding file systems.
    fn push_unique(plan: &mut Plan, seen: &mut HashSet<String>, file: PlannedFile) -> Result<()> {
        if !seen.insert(file.path.to_string_lossy().to_lowercase()) {
            return Err(SchemaError::DuplicateOutput { path: file.path }.into());
        }
        plan.files.push(file);
        Ok(())
    }

    fn write(&self, plan: Plan) -> Result<GenerationReport> {
        let mut report = GenerationReport::default();

        for dir in plan.directories {
            fs::create_dir_all(&dir).map_err(|e| GenError::io(&dir, e))?;
            debug!(path = %dir.display(), "ensured directory");
            report.directories.push(dir);
        }

        for file in plan.files {
            fs::write(&file.path, file.contents.as_bytes())
                .map_err(|e| GenError::io(&file.path, e))?;
            debug!(path = %file.path.display(), bytes = file.contents.len(), "wrote artifact");
            report.files.push(file.path);
        }

        info!(files = report.files.len(), "generation complete");
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mavforge_core::TemplateError;
    use mavforge_dialect::{Field, Message};

    fn common() -> Dialect {
        Dialect::new("common").with_message(
            Message::new(0, "Heartbeat")
                .with_field(Field::new("type", "uint8_t"))
                .with_field(Field::new("custom_mode", "uint32_t")),
        )
    }

    fn member_spec() -> ArtifactSpec {
        ArtifactSpec::new(
            "decl",
            Scope::Message,
            "public",
            "Decl_${name_lower}.h",
            "struct ${name} {\n${{fields:    ${type} ${name}${array_suffix}; ${array_cast}\n}}};\n",
        )
        .unwrap()
    }

    #[test]
    fn test_generator_config_default() {
        let config = GeneratorConfig::default();
        assert!(config.trim_leading_newline);
        assert!(!config.emit_dispatch);
        assert_eq!(
            config.module_dir(),
            PathBuf::from(".").join("MavLinkMsgs/Source/MavLinkMsgs")
        );
    }

    #[test]
    fn test_end_to_end_heartbeat() {
        let tmp = tempfile::tempdir().unwrap();
        let config = GeneratorConfig::new(tmp.path()).with_module_path("mod");
        let generator = CodeGenerator::with_artifacts(config, TypeMap::ue4(), vec![member_spec()]);

        let report = generator.generate(&[common()]).unwrap();

        let path = tmp.path().join("mod/public/common/Decl_heartbeat.h");
        assert_eq!(report.files, vec![path.clone()]);
        assert!(path.to_string_lossy().contains("heartbeat"));
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "struct Heartbeat {\n    uint8 type; \n    uint32 custom_mode; \n};\n"
        );
    }

    #[test]
    fn test_builtin_artifacts_layout() {
        let tmp = tempfile::tempdir().unwrap();
        let config = GeneratorConfig::new(tmp.path()).with_dispatch(true);
        let generator = CodeGenerator::new(config).unwrap();

        let report = generator.generate(&[common()]).unwrap();

        let module = tmp.path().join("MavLinkMsgs/Source/MavLinkMsgs");
        let header = module.join("public/common/MavLinkMsg_heartbeat.h");
        let source = module.join("private/common/MavLinkMsg_heartbeat.cpp");
        let dispatch = module.join("public/common/common_dispatch.h");
        assert_eq!(report.files, vec![header.clone(), source.clone(), dispatch.clone()]);
        assert_eq!(report.directories.len(), 2);

        let header = fs::read_to_string(header).unwrap();
        assert!(header.starts_with("#pragma once"));
        assert!(fs::read_to_string(source).unwrap().contains("mavlink_msg_heartbeat_pack"));
        assert!(dispatch.exists());
    }

    #[test]
    fn test_regeneration_is_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        let generator = CodeGenerator::new(GeneratorConfig::new(tmp.path())).unwrap();

        let first = generator.generate(&[common()]).unwrap();
        let before: Vec<String> = first
            .files
            .iter()
            .map(|p| fs::read_to_string(p).unwrap())
            .collect();
        let second = generator.generate(&[common()]).unwrap();
        let after: Vec<String> = second
            .files
            .iter()
            .map(|p| fs::read_to_string(p).unwrap())
            .collect();

        assert_eq!(first, second);
        assert_eq!(before, after);
    }

    #[test]
    fn test_overwrites_existing_file() {
        let tmp = tempfile::tempdir().unwrap();
        let config = GeneratorConfig::new(tmp.path()).with_module_path("mod");
        let generator = CodeGenerator::with_artifacts(config, TypeMap::ue4(), vec![member_spec()]);
        let path = tmp.path().join("mod/public/common/Decl_heartbeat.h");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "stale contents that are much longer than the output").unwrap();

        generator.generate(&[common()]).unwrap();

        assert!(fs::read_to_string(&path).unwrap().starts_with("struct Heartbeat {"));
    }

    #[test]
    fn test_empty_dialect_creates_directories() {
        let tmp = tempfile::tempdir().unwrap();
        let generator = CodeGenerator::new(GeneratorConfig::new(tmp.path())).unwrap();

        let report = generator.generate(&[Dialect::new("empty")]).unwrap();

        assert!(report.files.is_empty());
        let module = tmp.path().join("MavLinkMsgs/Source/MavLinkMsgs");
        assert!(module.join("public/empty").is_dir());
        assert!(module.join("private/empty").is_dir());
    }

    #[test]
    fn test_unknown_type_writes_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let generator = CodeGenerator::new(GeneratorConfig::new(tmp.path())).unwrap();
        let bad = Dialect::new("extra").with_message(
            Message::new(9, "BROKEN").with_field(Field::new("wide", "uint128_t")),
        );

        let err = generator.generate(&[common(), bad]).unwrap_err();

        assert!(matches!(
            err,
            GenError::Schema(SchemaError::UnknownType { ref field, .. }) if field == "wide"
        ));
        assert!(!tmp.path().join("MavLinkMsgs").exists());
    }

    #[test]
    fn test_unresolved_placeholder_aborts() {
        let tmp = tempfile::tempdir().unwrap();
        let spec =
            ArtifactSpec::new("decl", Scope::Message, "public", "x_${name_lower}.h", "${nonexistent_attr}")
                .unwrap();
        let generator = CodeGenerator::with_artifacts(
            GeneratorConfig::new(tmp.path()),
            TypeMap::ue4(),
            vec![spec],
        );

        let err = generator.generate(&[common()]).unwrap_err();

        match err {
            GenError::Template(TemplateError::Unresolved {
                template,
                placeholder,
                ..
            }) => {
                assert_eq!(template, "decl");
                assert_eq!(placeholder, "nonexistent_attr");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(!tmp.path().join("MavLinkMsgs").exists());
    }

    #[test]
    fn test_duplicate_output_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let spec = ArtifactSpec::new("decl", Scope::Message, "public", "same.h", "").unwrap();
        let generator = CodeGenerator::with_artifacts(
            GeneratorConfig::new(tmp.path()),
            TypeMap::ue4(),
            vec![spec],
        );
        let dialect = common().with_message(Message::new(1, "PING"));

        assert!(matches!(
            generator.generate(&[dialect]),
            Err(GenError::Schema(SchemaError::DuplicateOutput { .. }))
        ));
    }

    #[test]
    fn test_invalid_schema_rejected_before_render() {
        let tmp = tempfile::tempdir().unwrap();
        let generator = CodeGenerator::new(GeneratorConfig::new(tmp.path())).unwrap();

        assert!(matches!(
            generator.generate(&[Dialect::new("bad/name")]),
            Err(GenError::Schema(SchemaError::InvalidIdentifier { .. }))
        ));
    }

    #[test]
    fn test_override_template() {
        let tmp = tempfile::tempdir().unwrap();
        let mut generator = CodeGenerator::new(GeneratorConfig::new(tmp.path())).unwrap();

        assert!(generator.override_template("header", "// ${name}\n").unwrap());
        assert!(!generator.override_template("missing", "").unwrap());

        let report = generator.generate(&[common()]).unwrap();
        assert_eq!(fs::read_to_string(&report.files[0]).unwrap(), "// Heartbeat\n");
    }

    #[test]
    fn test_custom_type_map() {
        let tmp = tempfile::tempdir().unwrap();
        let config = GeneratorConfig::new(tmp.path()).with_module_path("mod");
        let generator = CodeGenerator::with_artifacts(config, TypeMap::ue4(), vec![member_spec()])
            .with_types(TypeMap::empty().with("uint8_t", "u8").with("uint32_t", "u32"));

        let report = generator.generate(&[common()]).unwrap();

        let out = fs::read_to_string(&report.files[0]).unwrap();
        assert!(out.contains("u8 type;"));
        assert!(out.contains("u32 custom_mode;"));
    }

    #[test]
    fn test_io_failure_aborts_with_path() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("file");
        fs::write(&blocker, "not a directory").unwrap();
        let generator = CodeGenerator::new(GeneratorConfig::new(&blocker)).unwrap();

        let err = generator.generate(&[common()]).unwrap_err();

        match err {
            GenError::Io { path, .. } => {
                assert!(path.starts_with(&blocker));
                assert!(path.ends_with("public/common"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(fs::read_to_string(&blocker).unwrap(), "not a directory");
    }

    #[test]
    fn test_keep_leading_newline() {
        let tmp = tempfile::tempdir().unwrap();
        let config = GeneratorConfig::new(tmp.path()).with_trim_leading_newline(false);
        let generator = CodeGenerator::new(config).unwrap();
        assert_eq!(generator.artifacts()[0].kind(), "header");

        let report = generator.generate(&[common()]).unwrap();

        let header = fs::read_to_string(&report.files[0]).unwrap();
        assert!(header.starts_with("\n#pragma once"));
    }

    #[test]
    fn test_case_insensitive_duplicate_output() {
        let tmp = tempfile::tempdir().unwrap();
        let generator = CodeGenerator::new(GeneratorConfig::new(tmp.path())).unwrap();
        let upper = Dialect::new("Common").with_message(Message::new(0, "Heartbeat"));

        let err = generator.generate(&[common(), upper]).unwrap_err();

        assert!(matches!(
            err,
            GenError::Schema(SchemaError::DuplicateOutput { .. })
        ));
        assert!(!tmp.path().join("MavLinkMsgs").exists());
    }
}
