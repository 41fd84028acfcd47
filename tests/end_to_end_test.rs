mod common;

use anyhow::Result;
use async_trait::async_trait;
use httpmock::prelude::*;
use std::fs;
use std::path::Path;
use svc_scaffold::domain::ports::ArchiveFetcher;
use svc_scaffold::{
    BootstrapDir, HttpFetcher, Phase, ScaffoldEngine, ScaffoldError, ScaffoldPlan, ServiceInputs,
};
use tempfile::TempDir;

fn destination_basic() -> ServiceInputs {
    ServiceInputs {
        name: "Destination-Basic".to_string(),
        route: "Destinations".to_string(),
        port: "9201".to_string(),
    }
}

/// Serves a fixed archive without touching the network.
struct FixtureFetcher {
    archive: Vec<u8>,
}

#[async_trait]
impl ArchiveFetcher for FixtureFetcher {
    async fn fetch(&self, _url: &str, dest: &Path) -> svc_scaffold::Result<u64> {
        fs::write(dest, &self.archive)?;
        Ok(self.archive.len() as u64)
    }
}

#[tokio::test]
async fn test_end_to_end_scaffold_over_http() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let bootstrap = temp_dir.path().join(".svc-scaffold");
    let output = temp_dir.path().join("work");

    let server = MockServer::start();
    let archive_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/bee-travels/node-service-template/archive/master.zip");
        then.status(200)
            .header("Content-Type", "application/zip")
            .body(common::service_template());
    });

    let engine = ScaffoldEngine::new(HttpFetcher::new(), BootstrapDir::new(&bootstrap));
    let plan = ScaffoldPlan {
        archive_url: server.url("/bee-travels/node-service-template/archive/master.zip"),
        output_dir: output.clone(),
    };

    let outcome = engine.run(&plan, &destination_basic()).await?;

    archive_mock.assert();
    let project = output.join("destination-basic");
    assert_eq!(outcome.project_dir, project);
    assert_eq!(outcome.record.service_name_title(), "Destination Basic");

    assert_eq!(
        fs::read_to_string(project.join("package.json"))?,
        r#"{ "name": "destination-basic", "description": "Destination Basic service" }"#
    );
    // The placeholder directory keeps its name; its files are rendered.
    assert_eq!(
        fs::read_to_string(project.join("{{ServiceNamePill}}/index.js"))?,
        "const port = 9201;\napp.use('/api/v1/destinations', router);\n"
    );
    assert_eq!(
        fs::read_to_string(project.join("src/destination-basic.config.js"))?,
        "// destination basic\n"
    );
    assert_eq!(
        fs::read_to_string(project.join("README.md"))?,
        "No placeholders here.\n"
    );

    assert_eq!(outcome.report.files_visited, 4);
    assert_eq!(outcome.report.files_renamed, 1);

    // Temporary artifacts are gone, the bootstrap directory itself stays.
    let workspace = engine.workspace();
    assert!(workspace.root().is_dir());
    assert!(!workspace.archive_path().exists());
    assert!(!workspace.extraction_root().exists());
    Ok(())
}

#[tokio::test]
async fn test_end_to_end_with_http_failure() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/missing.zip");
        then.status(404);
    });

    let engine = ScaffoldEngine::new(
        HttpFetcher::new(),
        BootstrapDir::new(temp_dir.path().join("boot")),
    );
    let plan = ScaffoldPlan {
        archive_url: server.url("/missing.zip"),
        output_dir: temp_dir.path().join("work"),
    };

    let err = engine.run(&plan, &destination_basic()).await.unwrap_err();

    api_mock.assert();
    assert_eq!(err.phase, Phase::Acquire);
    assert!(matches!(err.source, ScaffoldError::HttpStatus { status: 404, .. }));
    assert!(!temp_dir.path().join("work").exists());
    assert!(!engine.workspace().archive_path().exists());
    Ok(())
}

#[tokio::test]
async fn test_corrupt_archive_fails_in_extract_phase() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let engine = ScaffoldEngine::new(
        FixtureFetcher {
            archive: b"<html>rate limited</html>".to_vec(),
        },
        BootstrapDir::new(temp_dir.path().join("boot")),
    );
    let plan = ScaffoldPlan {
        archive_url: "https://example.com/t.zip".to_string(),
        output_dir: temp_dir.path().join("work"),
    };

    let err = engine.run(&plan, &destination_basic()).await.unwrap_err();

    assert_eq!(err.phase, Phase::Extract);
    assert!(matches!(err.source, ScaffoldError::Archive(_)));
    assert!(!engine.workspace().archive_path().exists());
    Ok(())
}

#[tokio::test]
async fn test_multiple_top_level_entries_fail_in_finalize_phase() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let archive = common::build_archive(&[
        ("first/", ""),
        ("first/a.txt", "a"),
        ("second/", ""),
        ("second/b.txt", "b"),
    ]);
    let engine = ScaffoldEngine::new(
        FixtureFetcher { archive },
        BootstrapDir::new(temp_dir.path().join("boot")),
    );
    let plan = ScaffoldPlan {
        archive_url: "https://example.com/t.zip".to_string(),
        output_dir: temp_dir.path().join("work"),
    };

    let err = engine.run(&plan, &destination_basic()).await.unwrap_err();

    assert_eq!(err.phase, Phase::Finalize);
    assert!(matches!(
        err.source,
        ScaffoldError::AmbiguousArchiveLayout { found: 2, .. }
    ));
    assert!(!engine.workspace().extraction_root().exists());
    Ok(())
}

#[tokio::test]
async fn test_malformed_template_fails_in_transform_phase() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let archive = common::build_archive(&[
        ("root/", ""),
        ("root/index.js", "listen({{Host}})"),
    ]);
    let engine = ScaffoldEngine::new(
        FixtureFetcher { archive },
        BootstrapDir::new(temp_dir.path().join("boot")),
    );
    let plan = ScaffoldPlan {
        archive_url: "https://example.com/t.zip".to_string(),
        output_dir: temp_dir.path().join("work"),
    };

    let err = engine.run(&plan, &destination_basic()).await.unwrap_err();

    assert_eq!(err.phase, Phase::Transform);
    assert!(matches!(err.source, ScaffoldError::Transform { .. }));
    assert!(err.source.to_string().contains("index.js"));
    Ok(())
}

#[tokio::test]
async fn test_existing_destination_is_refused() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output = temp_dir.path().join("work");
    fs::create_dir_all(output.join("destination-basic"))?;
    fs::write(output.join("destination-basic/keep.txt"), "mine")?;

    let engine = ScaffoldEngine::new(
        FixtureFetcher {
            archive: common::service_template(),
        },
        BootstrapDir::new(temp_dir.path().join("boot")),
    );
    let plan = ScaffoldPlan {
        archive_url: "https://example.com/t.zip".to_string(),
        output_dir: output.clone(),
    };

    let err = engine.run(&plan, &destination_basic()).await.unwrap_err();

    assert_eq!(err.phase, Phase::Finalize);
    assert!(matches!(err.source, ScaffoldError::Io(_)));
    assert_eq!(
        fs::read_to_string(output.join("destination-basic/keep.txt"))?,
        "mine"
    );
    assert!(!output.join("destination-basic/package.json").exists());
    Ok(())
}
