// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Writing rendered images to disk.
//!
//! The image is encoded into a temporary file next to the destination
//! and then renamed over it, so a failed or interrupted write never
//! leaves a half-written image behind.

use failure::Error;
use image::png::PNGEncoder;
use image::pnm::PNMEncoder;
use image::pnm::{PNMSubtype, SampleEncoding};
use image::ColorType;
use std::io::{BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

use render::Raster;

/// The supported encodings.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Format {
    /// RGBA PNG.
    Png,
    /// Binary RGB PPM.
    Pnm,
}

impl Format {
    /// Chosen by extension: `.pnm` and `.ppm` are PNM, everything else
    /// is PNG.
    pub fn for_path(path: &Path) -> Format {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
        {
            Some(ref e) if e == "pnm" || e == "ppm" => Format::Pnm,
            _ => Format::Png,
        }
    }
}

fn directory_of(path: &Path) -> &Path {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    }
}

/// Make sure we will be able to write to `path` before spending any
/// time sampling.
pub fn check_destination(path: &Path) -> Result<(), Error> {
    NamedTempFile::new_in(directory_of(path))?;
    Ok(())
}

/// Encode a raster in the given format.
pub fn encode<W: Write>(output: W, raster: &Raster, format: Format) -> Result<(), Error> {
    let (width, height) = (raster.width() as u32, raster.height() as u32);
    match format {
        Format::Png => {
            PNGEncoder::new(output).encode(raster.as_rgba(), width, height, ColorType::RGBA(8))?
        }
        Format::Pnm => {
            let mut encoder = PNMEncoder::new(output)
                .with_subtype(PNMSubtype::Pixmap(SampleEncoding::Binary));
            encoder.encode(&raster.to_rgb()[..], width, height, ColorType::RGB(8))?
        }
    }
    Ok(())
}

/// Atomically write a raster to `path`, encoded according to its
/// extension.
pub fn write_image(path: &Path, raster: &Raster) -> Result<(), Error> {
    let mut temp = NamedTempFile::new_in(directory_of(path))?;
    {
        let mut output = BufWriter::new(temp.as_file_mut());
        encode(&mut output, raster, Format::for_path(path))?;
        output.flush()?;
    }
    temp.persist(path).map_err(|e| e.error)?;
    debug!("Wrote {}x{} image to {}", raster.width(), raster.height(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn format_follows_extension() {
        assert_eq!(Format::for_path(Path::new("out.png")), Format::Png);
        assert_eq!(Format::for_path(Path::new("out.PPM")), Format::Pnm);
        assert_eq!(Format::for_path(Path::new("a/b/out.pnm")), Format::Pnm);
        assert_eq!(Format::for_path(Path::new("out")), Format::Png);
    }

    #[test]
    fn writes_png() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("buddha.png");
        write_image(&path, &Raster::black(3, 2)).unwrap();
        let bytes = fs::read(&path).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn writes_ppm() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("buddha.ppm");
        write_image(&path, &Raster::black(3, 2)).unwrap();
        let bytes = fs::read(&path).unwrap();
        assert_eq!(&bytes[..2], b"P6");
        assert!(bytes.ends_with(&[0; 18]));
    }

    #[test]
    fn overwrites_and_leaves_nothing_behind() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("buddha.png");
        fs::write(&path, b"stale").unwrap();
        write_image(&path, &Raster::black(2, 2)).unwrap();
        assert_ne!(fs::read(&path).unwrap(), b"stale".to_vec());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nowhere").join("buddha.png");
        assert!(check_destination(&path).is_err());
        assert!(write_image(&path, &Raster::black(2, 2)).is_err());
        assert!(check_destination(&dir.path().join("buddha.png")).is_ok());
    }
}
