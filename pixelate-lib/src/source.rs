use ::image::io::Reader as ImageReader;
use anyhow::{ensure, Context, Result};
pub use std::path::{Path, PathBuf};

use crate::RgbImage;

/// Decoded input images, each paired with the path it was read from.
pub struct Source {
    images: Vec<(PathBuf, RgbImage)>,
}

impl Source {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let image = load(&path)?;

        Ok(Self {
            images: vec![(path, image)],
        })
    }

    pub fn from_glob(pattern: &str) -> Result<Self> {
        Self::from_glob_with(pattern, |_| true)
    }

    /// Like [`Source::from_glob`], but only decodes the matches `keep`
    /// accepts.
    pub fn from_glob_with(pattern: &str, keep: impl Fn(&Path) -> bool) -> Result<Self> {
        let paths = glob::glob(pattern)
            .with_context(|| format!("Couldn't parse pattern: {}", pattern))?;

        let mut paths = paths
            .collect::<Result<Vec<_>, _>>()
            .context("Couldn't find images")?;

        paths.retain(|path| path.is_file() && keep(path.as_path()));
        paths.sort();

        ensure!(!paths.is_empty(), "No images match: {}", pattern);

        let images = paths.into_iter().map(|path| {
            let image = load(&path)?;

            Ok((path, image))
        });

        Ok(Self {
            images: images.collect::<Result<_>>()?,
        })
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn images(&self) -> impl Iterator<Item = (&Path, &RgbImage)> {
        self.images.iter().map(|(path, image)| (path.as_path(), image))
    }

    pub fn into_images(self) -> impl Iterator<Item = (PathBuf, RgbImage)> {
        self.images.into_iter()
    }
}

fn load(path: &Path) -> Result<RgbImage> {
    let image = ImageReader::open(path)
        .with_context(|| format!("Couldn't open image: {}", path.display()))?
        .with_guessed_format()
        .with_context(|| format!("Couldn't read image: {}", path.display()))?
        .decode()
        .with_context(|| format!("Couldn't decode image: {}", path.display()))?;

    Ok(image.to_rgb8())
}

/// Whether `input` should be expanded with [`Source::from_glob`] rather
/// than opened as a single file.
pub fn is_pattern(input: &str) -> bool {
    input.contains(&['*', '?', '['][..])
}

pub fn is_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("jpg") || ext.eq_ignore_ascii_case("jpeg"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::image::Rgb;
    use tempfile::TempDir;

    fn write_image(dir: &TempDir, name: &str, color: Rgb<u8>) -> PathBuf {
        let path = dir.path().join(name);

        RgbImage::from_pixel(4, 3, color).save(&path).unwrap();
        path
    }

    #[test]
    fn opens_single_image() {
        let dir = TempDir::new().unwrap();
        let path = write_image(&dir, "a.png", Rgb([1, 2, 3]));
        let source = Source::open(&path).unwrap();

        let (loaded_path, image) = source.images().next().unwrap();

        assert_eq!(path.as_path(), loaded_path);
        assert_eq!((4, 3), image.dimensions());
        assert_eq!(Rgb([1, 2, 3]), *image.get_pixel(0, 0));
    }

    #[test]
    fn expands_glob_in_path_order() {
        let dir = TempDir::new().unwrap();

        write_image(&dir, "b.png", Rgb([2, 2, 2]));
        write_image(&dir, "a.png", Rgb([1, 1, 1]));
        std::fs::write(dir.path().join("notes.txt"), "not an image").unwrap();

        let pattern = dir.path().join("*.png");
        let source = Source::from_glob(&pattern.to_string_lossy()).unwrap();

        let names: Vec<_> = source
            .images()
            .map(|(path, _)| path.file_name().unwrap().to_string_lossy().into_owned())
            .collect();

        assert_eq!(vec!["a.png", "b.png"], names);
    }

    #[test]
    fn filters_matches_before_decoding() {
        let dir = TempDir::new().unwrap();

        write_image(&dir, "a.png", Rgb([1, 1, 1]));
        write_image(&dir, "b.jpg", Rgb([2, 2, 2]));
        std::fs::write(dir.path().join("c.txt"), "not an image").unwrap();

        let pattern = dir.path().join("*");
        let source = Source::from_glob_with(&pattern.to_string_lossy(), is_supported_extension).unwrap();

        let names: Vec<_> = source
            .images()
            .map(|(path, _)| path.file_name().unwrap().to_string_lossy().into_owned())
            .collect();

        assert_eq!(vec!["b.jpg"], names);
        assert!(Source::from_glob_with(&pattern.to_string_lossy(), |_| false).is_err());
    }

    #[test]
    fn empty_glob_is_an_error() {
        let dir = TempDir::new().unwrap();
        let pattern = dir.path().join("*.jpg");

        assert!(Source::from_glob(&pattern.to_string_lossy()).is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();

        assert!(Source::open(dir.path().join("nope.jpg")).is_err());
    }

    #[test]
    fn recognizes_jpeg_extensions() {
        assert!(is_supported_extension(Path::new("photo.jpg")));
        assert!(is_supported_extension(Path::new("photo.JPEG")));
        assert!(!is_supported_extension(Path::new("photo.png")));
        assert!(!is_supported_extension(Path::new("photo")));
    }

    #[test]
    fn detects_patterns() {
        assert!(is_pattern("frames/*.jpg"));
        assert!(is_pattern("img?.jpg"));
        assert!(!is_pattern("photo.jpg"));
    }
}
