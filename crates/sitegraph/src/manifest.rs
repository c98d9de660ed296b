//! Page manifest loading.
//!
//! The manifest is written by the content layer: every known slug plus
//! per-page metadata. YAML is used for `.yaml`/`.yml` files, JSON otherwise.

use std::path::Path;

use sitegraph_config::Config;
use sitegraph_engine::SiteInput;

use crate::error::CliError;

/// Manifest serialization format.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Format {
    Json,
    Yaml,
}

impl Format {
    fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Self::Yaml
            }
            _ => Self::Json,
        }
    }
}

/// Parse manifest content.
pub(crate) fn parse(content: &str, format: Format) -> Result<SiteInput, String> {
    match format {
        Format::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
        Format::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
    }
}

/// Load the configured manifest and register configured virtual pages.
pub(crate) fn load(config: &Config) -> Result<SiteInput, CliError> {
    let path = &config.site_resolved.manifest;
    let content = std::fs::read_to_string(path).map_err(|e| CliError::Manifest {
        path: path.clone(),
        message: e.to_string(),
    })?;

    let input = parse(&content, Format::from_path(path)).map_err(|message| {
        CliError::Manifest {
            path: path.clone(),
            message,
        }
    })?;

    tracing::info!(
        path = %path.display(),
        slugs = input.slugs.len(),
        pages = input.pages.len(),
        virtual_pages = config.site_resolved.virtual_pages.len(),
        "Manifest loaded"
    );

    Ok(input.with_virtual_pages(config.site_resolved.virtual_pages.iter().cloned()))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use sitegraph_config::CliSettings;
    use sitegraph_engine::PageInput;

    use super::*;

    #[test]
    fn test_format_from_path() {
        assert_eq!(Format::from_path(Path::new("site.yaml")), Format::Yaml);
        assert_eq!(Format::from_path(Path::new("site.YML")), Format::Yaml);
        assert_eq!(Format::from_path(Path::new("site.json")), Format::Json);
        assert_eq!(Format::from_path(Path::new("site")), Format::Json);
    }

    #[test]
    fn test_parse_json() {
        let input = parse(
            r#"{"slugs": ["/a/"], "pages": [{"slug": "/a/", "title": "A", "links": ["/b/"]}]}"#,
            Format::Json,
        )
        .unwrap();

        assert_eq!(input.slugs, vec!["/a/"]);
        assert_eq!(
            input.pages,
            vec![PageInput::new("/a/").with_title("A").with_links(["/b/"])]
        );
    }

    #[test]
    fn test_parse_yaml() {
        let yaml = "\
slugs:
  - /courses/cs1675/
pages:
  - slug: /courses/cs1675/
    title: Intro to ML
";
        let input = parse(yaml, Format::Yaml).unwrap();

        assert_eq!(input.pages[0].title.as_deref(), Some("Intro to ML"));
        assert!(input.pages[0].links.is_empty());
    }

    #[test]
    fn test_parse_invalid_json_is_error() {
        assert!(parse("{", Format::Json).is_err());
    }

    #[test]
    fn test_load_appends_virtual_pages() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("sitegraph.toml");
        std::fs::write(&config_path, "[site]\nvirtual_pages = [\"/about/\"]\n").unwrap();
        std::fs::write(
            dir.path().join("site.json"),
            r#"{"slugs": ["/a/"], "pages": []}"#,
        )
        .unwrap();
        let config = Config::load(Some(&config_path), Some(&CliSettings::default())).unwrap();

        let input = load(&config).unwrap();

        assert_eq!(input.slugs, vec!["/a/", "/about/"]);
    }

    #[test]
    fn test_load_missing_manifest_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("sitegraph.toml");
        std::fs::write(&config_path, "").unwrap();
        let config = Config::load(Some(&config_path), None).unwrap();

        let err = load(&config).unwrap_err();

        assert!(matches!(err, CliError::Manifest { .. }));
    }
}
