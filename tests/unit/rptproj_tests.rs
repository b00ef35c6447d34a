//! Unit tests for .rptproj manifest parsing

use std::fs;
use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use sqlreport::project::parse_rptproj;
use sqlreport::report::{ParamPolicy, SqlDialect};
use tempfile::TempDir;

const MINIMAL_REPORT: &str = r#"<Report Name="R"><Sql>SELECT 1</Sql></Report>"#;

fn write(dir: &Path, relative: &str, content: &str) -> PathBuf {
    let path = dir.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}

fn relative_names(dir: &Path, files: &[PathBuf]) -> Vec<String> {
    files
        .iter()
        .map(|f| {
            f.strip_prefix(dir)
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect()
}

#[test]
fn test_parse_properties() {
    let dir = TempDir::new().unwrap();
    let manifest = write(
        dir.path(),
        "finance.rptproj",
        r#"<ReportProject>
  <PropertyGroup>
    <ParamPolicy>Warn</ParamPolicy>
    <Dialect>postgres</Dialect>
  </PropertyGroup>
</ReportProject>"#,
    );

    let project = parse_rptproj(&manifest).unwrap();
    assert_eq!(project.name, "finance");
    assert_eq!(project.project_dir, dir.path());
    assert_eq!(project.param_policy, ParamPolicy::Warn);
    assert_eq!(project.dialect, SqlDialect::PostgreSql);
}

#[test]
fn test_defaults_without_property_group() {
    let dir = TempDir::new().unwrap();
    let manifest = write(dir.path(), "r.rptproj", "<ReportProject />");

    let project = parse_rptproj(&manifest).unwrap();
    assert_eq!(project.param_policy, ParamPolicy::Strict);
    assert_eq!(project.dialect, SqlDialect::Generic);
    assert!(project.report_files.is_empty());
}

#[test]
fn test_include_and_remove_patterns() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "reports/a.report.xml", MINIMAL_REPORT);
    write(dir.path(), "reports/sub/b.report.xml", MINIMAL_REPORT);
    write(dir.path(), "reports/old/c.report.xml", MINIMAL_REPORT);
    write(dir.path(), "extra/single.xml", MINIMAL_REPORT);
    let manifest = write(
        dir.path(),
        "r.rptproj",
        r#"<ReportProject>
  <ItemGroup>
    <Report Include="reports\**\*.report.xml" />
    <Report Include="extra/single.xml" />
    <Report Include="extra/does-not-exist.xml" />
    <Report Remove="reports/old/*.report.xml" />
  </ItemGroup>
</ReportProject>"#,
    );

    let project = parse_rptproj(&manifest).unwrap();
    assert_eq!(
        relative_names(dir.path(), &project.report_files),
        vec![
            "extra/single.xml",
            "reports/a.report.xml",
            "reports/sub/b.report.xml",
        ]
    );
}

#[test]
fn test_default_discovery_skips_build_output() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "a.report.xml", MINIMAL_REPORT);
    write(dir.path(), "nested/B.Report.xml", MINIMAL_REPORT);
    write(dir.path(), "nested/notes.xml", MINIMAL_REPORT);
    write(dir.path(), "bin/gen.report.xml", MINIMAL_REPORT);
    write(dir.path(), "obj/Debug/gen.report.xml", MINIMAL_REPORT);
    let manifest = write(dir.path(), "r.rptproj", "<ReportProject></ReportProject>");

    let project = parse_rptproj(&manifest).unwrap();
    assert_eq!(
        relative_names(dir.path(), &project.report_files),
        vec!["a.report.xml", "nested/B.Report.xml"]
    );
}

#[test]
fn test_remove_applies_to_default_discovery() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "keep.report.xml", MINIMAL_REPORT);
    write(dir.path(), "drafts/skip.report.xml", MINIMAL_REPORT);
    let manifest = write(
        dir.path(),
        "r.rptproj",
        r#"<ReportProject><ItemGroup><Report Remove="drafts/*.report.xml" /></ItemGroup></ReportProject>"#,
    );

    let project = parse_rptproj(&manifest).unwrap();
    assert_eq!(
        relative_names(dir.path(), &project.report_files),
        vec!["keep.report.xml"]
    );
}

#[test]
fn test_bare_manifest_name_uses_current_directory() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "a.report.xml", MINIMAL_REPORT);
    write(dir.path(), "nested/b.report.xml", MINIMAL_REPORT);
    write(dir.path(), "r.rptproj", "<ReportProject />");

    let previous = std::env::current_dir().unwrap();
    std::env::set_current_dir(dir.path()).unwrap();
    let parsed = parse_rptproj(Path::new("r.rptproj"));
    std::env::set_current_dir(previous).unwrap();

    let project = parsed.unwrap();
    assert_eq!(project.name, "r");
    assert_eq!(project.project_dir, PathBuf::from("."));
    assert_eq!(
        relative_names(&project.project_dir, &project.report_files),
        vec!["a.report.xml", "nested/b.report.xml"]
    );
}

#[test]
fn test_wrong_root_element() {
    let dir = TempDir::new().unwrap();
    let manifest = write(dir.path(), "r.rptproj", "<Project />");

    let err = parse_rptproj(&manifest).unwrap_err();
    assert!(
        err.to_string().contains("<ReportProject>"),
        "unexpected error: {}",
        err
    );
}

#[test]
fn test_invalid_policy_value() {
    let dir = TempDir::new().unwrap();
    let manifest = write(
        dir.path(),
        "r.rptproj",
        "<ReportProject><PropertyGroup><ParamPolicy>Lenient</ParamPolicy></PropertyGroup></ReportProject>",
    );

    let err = parse_rptproj(&manifest).unwrap_err();
    assert!(err.to_string().contains("Lenient"), "unexpected error: {}", err);
}

#[test]
fn test_missing_manifest() {
    let dir = TempDir::new().unwrap();
    let err = parse_rptproj(&dir.path().join("none.rptproj")).unwrap_err();
    assert!(err.to_string().contains("Failed to read project file"));
}
