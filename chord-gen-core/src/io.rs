use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

/// Reads a text file and returns all its lines as a `Vec<String>`.
///
/// - Reads the entire file into memory
/// - Splits on `\n` / `\r\n`
pub(crate) fn read_file<P: AsRef<Path>>(filename: P) -> io::Result<Vec<String>> {
	let mut contents = String::new();
	File::open(filename)?.read_to_string(&mut contents)?;
	Ok(contents.lines().map(str::to_owned).collect())
}

/// Builds the path of a cache file derived from `input_path`.
///
/// The full file name is kept and `extension` is appended, so two sources
/// sharing a stem get distinct caches and a source never is its own cache.
///
/// Example:
/// `data/hyphenation.txt` + `"bin"` → `data/hyphenation.txt.bin`
pub(crate) fn build_cache_path<P: AsRef<Path>>(input_path: P, extension: &str) -> io::Result<PathBuf> {
	let input_path = input_path.as_ref();
	let file_name = input_path
		.file_name()
		.ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Input path has no filename"))?;

	let mut cache_name = file_name.to_os_string();
	cache_name.push(".");
	cache_name.push(extension);
	Ok(input_path.with_file_name(cache_name))
}

/// FNV-1a fingerprint of `bytes` (deterministic, not cryptographic).
pub(crate) fn fingerprint(bytes: &[u8]) -> u64 {
	let mut h: u64 = 14695981039346656037;
	for &b in bytes {
		h ^= b as u64;
		h = h.wrapping_mul(1099511628211);
	}
	h
}

/// Writes one CSV cell, quoting it if needed.
fn quote_csv_cell<W: Write>(mut wtr: W, mut data: &[u8]) -> io::Result<()> {
	let mut output = [0; 4096];
	let mut writer = csv_core::Writer::new();
	loop {
		let (result, nin, nout) = writer.field(data, &mut output);
		wtr.write_all(&output[..nout])?;
		if result == csv_core::WriteResult::InputEmpty {
			break;
		}
		data = &data[nin..];
	}
	let (_, nout) = writer.finish(&mut output);
	wtr.write_all(&output[..nout])?;
	Ok(())
}

/// Writes a two-column CSV file atomically.
///
/// - Creates missing parent directories
/// - Writes into a temporary file in the target directory, then persists it
///   over `path`, so readers never observe a half-written dataset
pub(crate) fn write_csv_atomic<'a, P, I>(path: P, header: [&str; 2], rows: I) -> io::Result<()>
where
	P: AsRef<Path>,
	I: IntoIterator<Item = [&'a str; 2]>,
{
	let path = path.as_ref();
	let parent = match path.parent() {
		Some(p) if !p.as_os_str().is_empty() => p,
		_ => Path::new("."),
	};
	fs::create_dir_all(parent)?;

	let temp_file = NamedTempFile::new_in(parent)?;
	{
		let mut writer = BufWriter::new(temp_file.as_file());
		write_row(&mut writer, header)?;
		for row in rows {
			write_row(&mut writer, row)?;
		}
		writer.flush()?;
	}
	temp_file.persist(path).map_err(|e| e.error)?;
	Ok(())
}

fn write_row<W: Write>(writer: &mut W, row: [&str; 2]) -> io::Result<()> {
	quote_csv_cell(&mut *writer, row[0].as_bytes())?;
	writer.write_all(b",")?;
	quote_csv_cell(&mut *writer, row[1].as_bytes())?;
	writer.write_all(b"\n")
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_build_cache_path_keeps_extension() {
		assert_eq!(build_cache_path("data/hyph.txt", "bin").unwrap(), PathBuf::from("data/hyph.txt.bin"));
		assert_eq!(build_cache_path("data/hyph.dic", "bin").unwrap(), PathBuf::from("data/hyph.dic.bin"));
		assert_eq!(build_cache_path("hyph.bin", "bin").unwrap(), PathBuf::from("hyph.bin.bin"));
		assert!(build_cache_path("", "bin").is_err());
	}

	#[test]
	fn test_fingerprint_tracks_content() {
		assert_eq!(fingerprint(b""), 14695981039346656037);
		assert_eq!(fingerprint(b"ta-ble\n"), fingerprint(b"ta-ble\n"));
		assert_ne!(fingerprint(b"ta-ble\n"), fingerprint(b"tab-le\n"));
	}

	#[test]
	fn test_quote_csv_cell_plain_and_quoted() {
		let mut out = Vec::new();
		quote_csv_cell(&mut out, b"acls-is").unwrap();
		assert_eq!(out, b"acls-is");

		let mut out = Vec::new();
		quote_csv_cell(&mut out, b"a,b").unwrap();
		assert_eq!(out, b"\"a,b\"");
	}

	#[test]
	fn test_write_csv_atomic_creates_parent() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("nested").join("out.csv");
		write_csv_atomic(&path, ["chords", "target_word"], vec![["a-t", "at"], ["at", "at"]]).unwrap();

		let lines = read_file(&path).unwrap();
		assert_eq!(lines, vec!["chords,target_word", "a-t,at", "at,at"]);
	}
}
