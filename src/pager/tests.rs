use super::*;
use crate::chunker::ChunkPolicy;
use crate::config::ConfigError;
use crate::navigator::NavigationError;
use crate::series::OrdinalLocale;
use std::io::Write;
use tempfile::TempDir;

fn small_pager(retention: RetentionPolicy) -> Pager {
    Pager::new(PagerConfig {
        policy: ChunkPolicy::FixedWidth { chunk_size: 4 },
        pages_per_series: 2,
        locale: OrdinalLocale::English,
        retention,
        ..PagerConfig::default()
    })
    .unwrap()
}

fn write_file(dir: &TempDir, name: &str, contents: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::File::create(&path)
        .unwrap()
        .write_all(contents)
        .unwrap();
    path
}

fn docx_bytes(paragraph: &str) -> Vec<u8> {
    let xml = format!(
        r#"<w:document xmlns:w="w"><w:body><w:p><w:r><w:t>{}</w:t></w:r></w:p></w:body></w:document>"#,
        paragraph
    );
    let mut writer = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
    writer
        .start_file("word/document.xml", zip::write::SimpleFileOptions::default())
        .unwrap();
    writer.write_all(xml.as_bytes()).unwrap();
    writer.finish().unwrap().into_inner()
}

// ========================================================================
// Construction
// ========================================================================

#[test]
fn test_new_rejects_zero_limits() {
    let config = PagerConfig {
        pages_per_series: 0,
        ..PagerConfig::default()
    };

    let result = Pager::new(config);
    assert!(matches!(
        result,
        Err(PagerError::Config(ConfigError::ZeroLimit("pages_per_series")))
    ));
}

#[test]
fn test_default_pager_is_empty() {
    let pager = Pager::default();
    assert!(pager.snapshot().is_empty());
    assert!(pager.first_page().unwrap().is_none());
    assert_eq!(pager.config(), &PagerConfig::default());
}

#[test]
fn test_listed_extensions_are_collected() {
    let dir = TempDir::new().unwrap();
    let pager = Pager::default();
    let extensions = pager.extractors().registered_extensions();
    assert_eq!(pager.extractors().extractor_count(), extensions.len());

    for ext in &extensions {
        write_file(&dir, &format!("doc.{}", ext), b"");
    }
    write_file(&dir, "doc.txt", b"");

    let files = pager.collect_files(&[dir.path().to_path_buf()]).unwrap();
    let collected: Vec<String> = files
        .iter()
        .filter_map(|p| p.extension())
        .map(|e| e.to_string_lossy().into_owned())
        .collect();
    assert_eq!(collected, extensions);
}

// ========================================================================
// Text ingest
// ========================================================================

#[test]
fn test_ingest_text_groups_pages() {
    let pager = small_pager(RetentionPolicy::Replace);
    let ingested = pager.ingest_text("memo", "abcdefghij", DocumentFormat::Text);

    // "abcd" "efgh" "ij" -> series of 2 + 1
    let titles: Vec<&str> = ingested.series().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, vec!["first series", "second series"]);
    assert_eq!(ingested.library.page_count(), 3);
    assert_eq!(ingested.document.char_count, 10);
    assert_eq!(ingested.document.source, "memo");
    assert_eq!(ingested.document.fingerprint, fingerprint("abcdefghij"));
}

#[test]
fn test_ingest_text_normalizes_first() {
    let pager = small_pager(RetentionPolicy::Replace);
    let ingested = pager.ingest_text("memo", "ab\ncd", DocumentFormat::Text);

    let first = ingested.first_series_id().unwrap();
    let view = pager.resolve_page(first, 1).unwrap();
    assert_eq!(view.content, "ab c");
}

#[test]
fn test_replace_retention_keeps_last_document() {
    let pager = small_pager(RetentionPolicy::Replace);
    let first = pager.ingest_text("one", "aaaabbbb", DocumentFormat::Text);
    let second = pager.ingest_text("two", "cccc", DocumentFormat::Text);

    let library = pager.snapshot();
    assert_eq!(library.len(), 1);
    assert_eq!(library.documents().len(), 1);
    assert_eq!(library.documents()[0].source, "two");

    let stale = first.first_series_id().unwrap();
    assert!(matches!(
        pager.resolve_page(stale, 1),
        Err(PagerError::Navigation(NavigationError::NotFound(id))) if id == stale
    ));
    assert!(pager.resolve_page(second.first_series_id().unwrap(), 1).is_ok());

    // the old snapshot is untouched
    assert_eq!(first.library.len(), 1);
    assert!(first.library.get(&stale).is_some());
}

#[test]
fn test_accumulate_retention_links_documents() {
    let pager = small_pager(RetentionPolicy::Accumulate);
    let first = pager.ingest_text("one", "aaaabbbb", DocumentFormat::Text);
    let second = pager.ingest_text("two", "cccc", DocumentFormat::Text);

    let library = pager.snapshot();
    assert_eq!(library.len(), 2);

    let view = pager
        .resolve_page(first.first_series_id().unwrap(), 2)
        .unwrap();
    assert!(view.is_last_page());
    assert_eq!(view.next_series_id, second.first_series_id());
    assert_eq!(view.prev_series_id, None);
}

#[test]
fn test_empty_text_clears_under_replace() {
    let pager = small_pager(RetentionPolicy::Replace);
    pager.ingest_text("one", "abcd", DocumentFormat::Text);
    let ingested = pager.ingest_text("blank", "\n\n", DocumentFormat::Text);

    assert!(ingested.document.series_ids.is_empty());
    assert!(pager.snapshot().is_empty());
    assert!(pager.first_page().unwrap().is_none());
}

#[test]
fn test_blank_text_yields_no_pages_under_every_policy() {
    let policies = [
        ChunkPolicy::FixedWidth { chunk_size: 4 },
        ChunkPolicy::Sentence { chunk_size: 4 },
        ChunkPolicy::Hybrid {
            chunk_size: 4,
            max_pages: 3,
        },
        ChunkPolicy::LineBounded {
            max_lines: 2,
            max_chars: 4,
        },
    ];

    for policy in policies {
        let pager = Pager::new(PagerConfig {
            policy,
            ..PagerConfig::default()
        })
        .unwrap();
        pager.ingest_text("seed", "abcd", DocumentFormat::Text);

        let ingested = pager.ingest_text("blank", "\n \n\n", DocumentFormat::Text);
        assert!(ingested.document.series_ids.is_empty(), "{}", policy);
        assert!(pager.first_page().unwrap().is_none(), "{}", policy);
    }
}

// ========================================================================
// Navigation
// ========================================================================

#[test]
fn test_resolve_position() {
    let pager = small_pager(RetentionPolicy::Replace);
    pager.ingest_text("memo", "abcdefghij", DocumentFormat::Text);

    let view = pager.resolve_position(2, 1).unwrap();
    assert_eq!(view.content, "ij");
    assert_eq!(view.series_title, "second series");
    assert!(view.next_series_id.is_none());
    assert!(view.prev_series_id.is_some());

    assert!(matches!(
        pager.resolve_position(3, 1),
        Err(PagerError::NoSuchPosition { position: 3, total: 2 })
    ));
    assert!(matches!(
        pager.resolve_position(0, 1),
        Err(PagerError::NoSuchPosition { position: 0, .. })
    ));
}

#[test]
fn test_resolve_out_of_range() {
    let pager = small_pager(RetentionPolicy::Replace);
    pager.ingest_text("memo", "abcdefghij", DocumentFormat::Text);

    let err = pager.resolve_position(1, 3).unwrap_err();
    assert!(matches!(
        err,
        PagerError::Navigation(NavigationError::OutOfRange { page: 3, total: 2 })
    ));
}

#[test]
fn test_first_page() {
    let pager = small_pager(RetentionPolicy::Replace);
    pager.ingest_text("memo", "abcdefghij", DocumentFormat::Text);

    let view = pager.first_page().unwrap().unwrap();
    assert_eq!(view.page_number, 1);
    assert_eq!(view.content, "abcd");
}

// ========================================================================
// File ingest
// ========================================================================

#[test]
fn test_ingest_plain_file() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "notes.txt", b"abcdef");

    let pager = small_pager(RetentionPolicy::Replace);
    let ingested = pager.ingest_file(&path).unwrap();

    assert_eq!(ingested.document.format, DocumentFormat::Text);
    assert_eq!(ingested.document.source, path.display().to_string());
    assert_eq!(ingested.library.page_count(), 2);
}

#[test]
fn test_ingest_docx_file() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "report.docx", &docx_bytes("Hello there"));

    let pager = small_pager(RetentionPolicy::Replace);
    let ingested = pager.ingest_file(&path).unwrap();

    assert_eq!(ingested.document.format, DocumentFormat::Docx);
    let view = pager.first_page().unwrap().unwrap();
    assert_eq!(view.content, "Hell");
}

#[test]
fn test_ingest_missing_file() {
    let dir = TempDir::new().unwrap();
    let pager = Pager::default();

    let result = pager.ingest_file(&dir.path().join("absent.pdf"));
    assert!(matches!(result, Err(PagerError::Io { .. })));
}

#[test]
fn test_ingest_broken_docx_is_extract_error() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "broken.docx", b"not a zip");

    let result = Pager::default().ingest_file(&path);
    assert!(matches!(
        result,
        Err(PagerError::Extract {
            source: crate::extract::ExtractError::ZipParseFailed(_),
            ..
        })
    ));
}

#[test]
fn test_collect_files_walks_supported_sorted() {
    let dir = TempDir::new().unwrap();
    write_file(&dir, "b.docx", &docx_bytes("b"));
    write_file(&dir, "a.docx", &docx_bytes("a"));
    write_file(&dir, "skip.txt", b"plain");
    write_file(&dir, ".hidden/c.docx", &docx_bytes("c"));
    write_file(&dir, "sub/d.DOCX", &docx_bytes("d"));
    let explicit = write_file(&dir, "explicit.txt", b"kept");

    let pager = Pager::default();
    let files = pager
        .collect_files(&[dir.path().to_path_buf(), explicit.clone()])
        .unwrap();

    let names: Vec<String> = files
        .iter()
        .map(|p| {
            p.strip_prefix(dir.path())
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect();
    assert_eq!(names, vec!["a.docx", "b.docx", "sub/d.DOCX", "explicit.txt"]);
}

#[test]
fn test_ingest_paths_accumulates_in_order() {
    let dir = TempDir::new().unwrap();
    write_file(&dir, "a.docx", &docx_bytes("aaaa"));
    write_file(&dir, "b.docx", &docx_bytes("bbbb"));

    let pager = small_pager(RetentionPolicy::Accumulate);
    let ingested = pager.ingest_paths(&[dir.path().to_path_buf()]).unwrap();

    assert_eq!(ingested.len(), 2);
    let library = pager.snapshot();
    let pages: Vec<&str> = library
        .iter()
        .flat_map(|s| s.pages.iter().map(String::as_str))
        .collect();
    assert_eq!(pages, vec!["aaaa", "bbbb"]);
}

#[test]
fn test_pager_shared_across_threads() {
    let pager = Arc::new(small_pager(RetentionPolicy::Replace));
    pager.ingest_text("seed", "abcdefgh", DocumentFormat::Text);

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let pager = Arc::clone(&pager);
            std::thread::spawn(move || {
                if i % 2 == 0 {
                    pager.ingest_text("writer", "wxyzwxyz", DocumentFormat::Text);
                } else {
                    // every snapshot is a complete library of 1 series, 2 pages
                    let library = pager.snapshot();
                    assert_eq!(library.len(), 1);
                    assert_eq!(library.page_count(), 2);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}
