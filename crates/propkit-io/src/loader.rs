use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use propkit_core::{ParseSummary, PropertySink, PropertyStore, parse_str};
use tracing::{debug, warn};

use crate::charset::{Charset, CharsetChoice, resolve_charset};
use crate::config::LoadOptions;
use crate::error::LoadResult;

pub fn load_reader<S, R>(
    sink: &mut S,
    mut reader: R,
    options: &LoadOptions,
) -> LoadResult<ParseSummary>
where
    S: PropertySink + ?Sized,
    R: Read,
{
    let charset = select_charset(options)?;
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    decode_into(sink, &bytes, charset)
}

pub fn load_bytes<S>(
    sink: &mut S,
    bytes: &[u8],
    options: &LoadOptions,
) -> LoadResult<ParseSummary>
where
    S: PropertySink + ?Sized,
{
    let charset = select_charset(options)?;
    decode_into(sink, bytes, charset)
}

pub fn load_file<S>(sink: &mut S, path: &Path, options: &LoadOptions) -> LoadResult<ParseSummary>
where
    S: PropertySink + ?Sized,
{
    debug!(path = %path.display(), "loading properties file");
    let file = File::open(path)?;
    load_reader(sink, file, options)
}

pub fn read_store<R: Read>(reader: R, options: &LoadOptions) -> LoadResult<PropertyStore> {
    let mut store = PropertyStore::new();
    load_reader(&mut store, reader, options)?;
    Ok(store)
}

fn select_charset(options: &LoadOptions) -> io::Result<Charset> {
    match resolve_charset(&options.preferred_charset)? {
        CharsetChoice::Preferred(charset) => Ok(charset),
        CharsetChoice::PlatformDefault(charset) => {
            warn!(
                preferred = %options.preferred_charset,
                fallback = %charset,
                "preferred charset unsupported, using platform default"
            );
            Ok(charset)
        }
    }
}

fn decode_into<S>(sink: &mut S, bytes: &[u8], charset: Charset) -> LoadResult<ParseSummary>
where
    S: PropertySink + ?Sized,
{
    debug!(charset = %charset, bytes = bytes.len(), "decoding properties source");
    let text = charset.decode(bytes);
    let summary = parse_str(&text, sink);
    debug!(
        lines = summary.lines,
        comments = summary.comments,
        continuations = summary.continuations,
        inserted = summary.inserted,
        dropped = summary.dropped,
        "parsed properties"
    );
    if summary.dangling {
        warn!("input ended inside a continuation line; trailing fragment dropped");
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::{load_bytes, load_file, load_reader, read_store};
    use crate::{LoadError, LoadOptions};
    use propkit_core::PropertyStore;
    use std::collections::HashMap;
    use std::fs;
    use std::io::{self, Cursor, Read};
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_path(name: &str) -> PathBuf {
        let mut path = std::env::temp_dir();
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time")
            .as_nanos();
        path.push(format!("propkit_{name}_{nanos}.properties"));
        path
    }

    struct UntouchedReader {
        read: bool,
    }

    impl Read for UntouchedReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            self.read = true;
            Ok(0)
        }
    }

    #[test]
    fn reads_store_from_utf8_stream() {
        let input = "# comment\nkey=This is my value string.\n";
        let store = read_store(Cursor::new(input), &LoadOptions::default()).expect("load");
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("key"), Some("This is my value string."));
    }

    #[test]
    fn loads_into_hash_map() {
        let mut map: HashMap<String, String> = HashMap::new();
        let summary =
            load_bytes(&mut map, b"a=1\n#skip\nb=2\n", &LoadOptions::default()).expect("load");
        assert_eq!(summary.inserted, 2);
        assert_eq!(map.get("a").map(String::as_str), Some("1"));
        assert_eq!(map.get("b").map(String::as_str), Some("2"));
    }

    #[test]
    fn decodes_latin1_when_requested() {
        let mut store = PropertyStore::new();
        let options = LoadOptions::with_charset("ISO-8859-1");
        load_bytes(&mut store, b"name=Ren\xe9\n", &options).expect("load");
        assert_eq!(store.get("name"), Some("René"));
    }

    #[test]
    fn unknown_charset_falls_back_to_utf8() {
        let mut store = PropertyStore::new();
        let options = LoadOptions::with_charset("x-unheard-of");
        load_bytes(&mut store, "name=Zoë".as_bytes(), &options).expect("load");
        assert_eq!(store.get("name"), Some("Zoë"));
    }

    #[test]
    fn illegal_charset_is_io_error_and_stream_is_untouched() {
        let mut store = PropertyStore::new();
        let mut reader = UntouchedReader { read: false };
        let options = LoadOptions::with_charset("not a charset");
        let err = load_reader(&mut store, &mut reader, &options).expect_err("illegal");
        let LoadError::Io(inner) = err;
        assert_eq!(inner.kind(), io::ErrorKind::InvalidInput);
        assert!(!reader.read);
        assert!(store.is_empty());
    }

    #[test]
    fn invalid_utf8_is_replaced_and_other_entries_load() {
        let mut store = PropertyStore::new();
        let summary =
            load_bytes(&mut store, b"a=1\nb=\xff\nc=3\n", &LoadOptions::default()).expect("load");
        assert_eq!(summary.inserted, 3);
        assert_eq!(store.get("a"), Some("1"));
        assert_eq!(store.get("b"), Some("\u{FFFD}"));
        assert_eq!(store.get("c"), Some("3"));
    }

    #[test]
    fn ascii_high_bytes_are_replaced_and_other_entries_load() {
        let mut store = PropertyStore::new();
        let options = LoadOptions::with_charset("US-ASCII");
        load_bytes(&mut store, b"name=Ren\xe9\nport=80\n", &options).expect("load");
        assert_eq!(store.get("name"), Some("Ren\u{FFFD}"));
        assert_eq!(store.get("port"), Some("80"));
    }

    #[test]
    fn dangling_continuation_is_reported_in_summary() {
        let mut store = PropertyStore::new();
        let summary =
            load_bytes(&mut store, b"a=1\nb=2\\", &LoadOptions::default()).expect("load");
        assert!(summary.dangling);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn loads_from_file() {
        let path = temp_path("file");
        fs::write(&path, "greeting = hello \\\r\n   world\r\nnoequalshere\r\n").expect("write");
        let mut store = PropertyStore::new();
        let summary = load_file(&mut store, &path, &LoadOptions::default()).expect("load");
        assert_eq!(summary.dropped, 1);
        assert_eq!(store.get("greeting "), Some(" helloworld"));
        fs::remove_file(&path).ok();
    }

    #[test]
    fn missing_file_is_not_found() {
        let path = temp_path("absent");
        let mut store = PropertyStore::new();
        let err = load_file(&mut store, &path, &LoadOptions::default()).expect_err("missing");
        let LoadError::Io(inner) = err;
        assert_eq!(inner.kind(), io::ErrorKind::NotFound);
    }
}
