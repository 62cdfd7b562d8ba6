//! Deterministic `.tar.gz` packing of a generated [`FileTree`].
//!
//! Entries keep tree order and carry fixed metadata (mode 0644, mtime 0,
//! uid/gid 0) and the gzip header has no timestamp, so the same tree always
//! packs to the same bytes.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use flate2::{Compression, GzBuilder};
use tar::{Builder, EntryType, Header};

use crate::assembler::FileTree;
use crate::error::PackError;

const ENTRY_MODE: u32 = 0o644;

/// A packed project ready to hand to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Archive {
    /// `<artifact id>.tar.gz`
    pub file_name: String,
    pub bytes: Vec<u8>,
}

pub fn pack(tree: &FileTree) -> Result<Vec<u8>, PackError> {
    let encoder = GzBuilder::new()
        .mtime(0)
        .write(Vec::with_capacity(16 * 1024), Compression::default());
    let mut builder = Builder::new(encoder);

    for file in tree.iter() {
        let data = file.content.as_bytes();
        let mut header = Header::new_gnu();
        header.set_entry_type(EntryType::Regular);
        header.set_size(data.len() as u64);
        header.set_mode(ENTRY_MODE);
        header.set_mtime(0);
        header.set_uid(0);
        header.set_gid(0);
        builder
            .append_data(&mut header, &file.path, data)
            .map_err(|source| PackError::Entry {
                path: file.path.clone(),
                source,
            })?;
    }

    let mut encoder = builder.into_inner()?;
    encoder.flush()?;
    Ok(encoder.finish()?)
}

/// Read a packed archive back into a tree, in archive order.
pub fn unpack(bytes: &[u8]) -> Result<FileTree, PackError> {
    let mut archive = tar::Archive::new(GzDecoder::new(bytes));
    let mut tree = FileTree::default();
    for entry in archive.entries()? {
        let mut entry = entry?;
        if entry.header().entry_type() != EntryType::Regular {
            continue;
        }
        let path = entry.path()?.to_string_lossy().into_owned();
        let mut content = String::new();
        entry
            .read_to_string(&mut content)
            .map_err(|source| PackError::Entry {
                path: path.clone(),
                source,
            })?;
        tree.insert(path, content);
    }
    Ok(tree)
}

/// Write the archive into `dir`, creating it if needed. The file appears
/// under its final name only once fully written.
pub async fn deliver(archive: &Archive, dir: &Path) -> Result<PathBuf, PackError> {
    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(&archive.file_name);
    let tmp = dir.join(format!(".{}.tmp", archive.file_name));
    tokio::fs::write(&tmp, &archive.bytes).await?;
    tokio::fs::rename(&tmp, &path).await?;
    tracing::info!(path = %path.display(), bytes = archive.bytes.len(), "archive delivered");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> FileTree {
        let mut tree = FileTree::default();
        tree.insert("shop/pom.xml".into(), "<project/>\n".into());
        tree.insert(
            "shop/src/main/java/shop/model/Order.java".into(),
            "package shop.model;\n".into(),
        );
        tree
    }

    #[test]
    fn packing_is_deterministic() {
        assert_eq!(pack(&sample()).unwrap(), pack(&sample()).unwrap());
    }

    #[test]
    fn unpack_restores_paths_and_order() {
        let bytes = pack(&sample()).unwrap();
        assert_eq!(unpack(&bytes).unwrap(), sample());
    }

    #[test]
    fn entries_carry_fixed_metadata() {
        let bytes = pack(&sample()).unwrap();
        let mut archive = tar::Archive::new(GzDecoder::new(bytes.as_slice()));
        for entry in archive.entries().unwrap() {
            let entry = entry.unwrap();
            let header = entry.header();
            assert_eq!(header.mode().unwrap(), 0o644);
            assert_eq!(header.mtime().unwrap(), 0);
            assert_eq!(header.entry_type(), EntryType::Regular);
        }
    }

    #[test]
    fn long_paths_survive() {
        let mut tree = FileTree::default();
        let path = format!("p/{}Deep.java", "segment/".repeat(20));
        tree.insert(path.clone(), "x".into());
        let restored = unpack(&pack(&tree).unwrap()).unwrap();
        assert_eq!(restored.get(&path), Some("x"));
    }

    #[test]
    fn garbage_does_not_unpack() {
        assert!(unpack(b"not an archive").is_err());
    }

    #[tokio::test]
    async fn deliver_writes_final_file_only() {
        let dir = tempfile::tempdir().unwrap();
        let archive = Archive {
            file_name: "shop.tar.gz".into(),
            bytes: pack(&sample()).unwrap(),
        };

        let path = deliver(&archive, &dir.path().join("out")).await.unwrap();

        assert_eq!(path, dir.path().join("out/shop.tar.gz"));
        assert_eq!(std::fs::read(&path).unwrap(), archive.bytes);
        let names: Vec<_> = std::fs::read_dir(dir.path().join("out"))
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names.len(), 1);
    }
}
