use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Instant;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::ser::{PrettyFormatter, Serializer};
use tracing::info;

use crate::domain::GroupCount;
use crate::error::OutputError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuilderCount {
    pub builder: String,
    pub count: u64,
}

/// `YYYY-MM-DD` to builder counts, in aggregation order.
pub type OutputMap = IndexMap<String, Vec<BuilderCount>>;

pub fn build_output_map(groups: &[GroupCount]) -> OutputMap {
    let mut map = OutputMap::new();
    for group in groups {
        map.entry(group.key.date_string())
            .or_default()
            .push(BuilderCount {
                builder: group.key.builder.clone(),
                count: group.count,
            });
    }
    map
}

fn serialize_map<W: Write>(writer: W, map: &OutputMap) -> Result<(), serde_json::Error> {
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = Serializer::with_formatter(writer, formatter);
    map.serialize(&mut serializer)
}

/// Renders `map` as JSON with 4-space indentation and no trailing newline.
pub fn render_json(map: &OutputMap) -> Result<String, OutputError> {
    let mut buf = Vec::new();
    serialize_map(&mut buf, map)?;
    Ok(String::from_utf8(buf)?)
}

/// Writes the report to `path`, replacing whatever was there.
pub fn write_report(path: &Path, map: &OutputMap) -> Result<(), OutputError> {
    let start_time = Instant::now();

    let file = File::create(path).map_err(|source| OutputError::Create {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);

    serialize_map(&mut writer, map).map_err(|e| {
        if e.is_io() {
            OutputError::Write {
                path: path.to_path_buf(),
                source: e.into(),
            }
        } else {
            OutputError::Serialize(e)
        }
    })?;
    writer.flush().map_err(|source| OutputError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    info!(
        action = "complete",
        component = "writer",
        path = ?path,
        date_count = map.len(),
        duration_ms = start_time.elapsed().as_millis(),
        "Report written"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::GroupKey;
    use chrono::NaiveDate;

    fn group(d: u32, builder: &str, count: u64) -> GroupCount {
        GroupCount {
            key: GroupKey {
                date: NaiveDate::from_ymd_opt(2023, 5, d).unwrap(),
                builder: builder.to_string(),
            },
            count,
        }
    }

    #[test]
    fn groups_nest_under_their_date() {
        let map = build_output_map(&[
            group(20, "A", 2),
            group(20, "B", 1),
            group(21, "A", 4),
        ]);
        assert_eq!(
            map.keys().collect::<Vec<_>>(),
            vec!["2023-05-20", "2023-05-21"]
        );
        assert_eq!(
            map["2023-05-20"],
            vec![
                BuilderCount {
                    builder: "A".into(),
                    count: 2
                },
                BuilderCount {
                    builder: "B".into(),
                    count: 1
                }
            ]
        );
    }

    #[test]
    fn renders_with_four_space_indent() {
        let map = build_output_map(&[group(20, "A", 2)]);
        let expected = r#"{
    "2023-05-20": [
        {
            "builder": "A",
            "count": 2
        }
    ]
}"#;
        assert_eq!(render_json(&map).unwrap(), expected);
    }

    #[test]
    fn written_file_matches_rendered_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output.json");
        let map = build_output_map(&[group(20, "ビルダー", 3), group(21, "titan", 1)]);

        write_report(&path, &map).unwrap();

        let rendered = render_json(&map).unwrap();
        assert!(rendered.contains("\"builder\": \"ビルダー\""));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), rendered);
    }

    #[test]
    fn empty_map_renders_as_braces() {
        assert_eq!(render_json(&OutputMap::new()).unwrap(), "{}");
    }

    #[test]
    fn write_report_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output.json");
        std::fs::write(&path, "stale contents that are longer than the report").unwrap();

        write_report(&path, &OutputMap::new()).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}");
    }

    #[test]
    fn write_report_fails_for_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("output.json");
        let err = write_report(&path, &OutputMap::new()).unwrap_err();
        assert!(matches!(err, OutputError::Create { .. }));
    }
}
