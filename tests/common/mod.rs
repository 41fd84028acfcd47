#![allow(dead_code)]

use std::io::{Cursor, Write};
use zip::write::{SimpleFileOptions, ZipWriter};

pub const ROOT: &str = "node-service-template-master";

/// Builds an in-memory zip. Entries ending in `/` become directories.
pub fn build_archive(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

    for (name, content) in entries {
        if name.ends_with('/') {
            zip.add_directory(*name, SimpleFileOptions::default().unix_permissions(0o755))
                .unwrap();
        } else {
            zip.start_file(*name, SimpleFileOptions::default().unix_permissions(0o644))
                .unwrap();
            zip.write_all(content.as_bytes()).unwrap();
        }
    }

    zip.finish().unwrap().into_inner()
}

/// A small service template laid out the way GitHub archives are.
pub fn service_template() -> Vec<u8> {
    build_archive(&[
        ("node-service-template-master/", ""),
        (
            "node-service-template-master/package.json",
            r#"{ "name": "{{ServiceNamePill}}", "description": "{{ServiceNameTitle}} service" }"#,
        ),
        ("node-service-template-master/{{ServiceNamePill}}/", ""),
        (
            "node-service-template-master/{{ServiceNamePill}}/index.js",
            "const port = {{Port}};\napp.use('/api/v1/{{Route}}', router);\n",
        ),
        (
            "node-service-template-master/src/{{ServiceNamePill}}.config.js",
            "// {{ServiceNameLower}}\n",
        ),
        ("node-service-template-master/README.md", "No placeholders here.\n"),
    ])
}
