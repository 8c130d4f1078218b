//! Shader source lookup.
//!
//! Every shader set is a `vert.glsl`/`frag.glsl` pair in a directory named
//! after the set. The built-in copies are compiled into the binary; a shader
//! directory on disk takes precedence when one is configured.

use std::path::{Path, PathBuf};

use glsteps_core::ShaderSet;
use include_dir::{Dir, include_dir};

use crate::error::Error;

static BUILTIN_SHADERS: Dir = include_dir!("$CARGO_MANIFEST_DIR/shaders");

pub const VERTEX_FILE: &str = "vert.glsl";
pub const FRAGMENT_FILE: &str = "frag.glsl";

/// The source text of a vertex/fragment pair.
#[derive(Debug, Clone)]
pub struct ShaderSources {
    pub vertex: String,
    pub fragment: String,
}

/// Where shader sources are read from.
#[derive(Debug, Clone)]
pub enum ShaderLibrary {
    Builtin,
    Directory(PathBuf),
}

impl ShaderLibrary {
    pub fn new(dir: Option<&Path>) -> Self {
        match dir {
            Some(dir) => ShaderLibrary::Directory(dir.to_path_buf()),
            None => ShaderLibrary::Builtin,
        }
    }

    /// Reads both sources of `set`. Called once per stage, before the first frame.
    pub fn load(&self, set: ShaderSet) -> Result<ShaderSources, Error> {
        let sources = ShaderSources {
            vertex: self.read(set, VERTEX_FILE)?,
            fragment: self.read(set, FRAGMENT_FILE)?,
        };
        log::debug!("Loaded {} shaders from {:?}", set.dir_name(), self);
        Ok(sources)
    }

    fn read(&self, set: ShaderSet, file: &str) -> Result<String, Error> {
        let relative = Path::new(set.dir_name()).join(file);
        match self {
            ShaderLibrary::Builtin => BUILTIN_SHADERS
                .get_file(&relative)
                .and_then(|f| f.contents_utf8())
                .map(str::to_owned)
                .ok_or_else(|| Error::ShaderSource {
                    path: relative.display().to_string(),
                    source: None,
                }),
            ShaderLibrary::Directory(dir) => {
                let path = dir.join(&relative);
                std::fs::read_to_string(&path).map_err(|e| Error::ShaderSource {
                    path: path.display().to_string(),
                    source: Some(e),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_sets_are_complete() {
        let library = ShaderLibrary::Builtin;
        for set in [
            ShaderSet::Quad,
            ShaderSet::Color,
            ShaderSet::Texture,
            ShaderSet::Lighting,
        ] {
            let sources = library.load(set).unwrap();
            assert!(sources.vertex.contains("aVertexPosition"));
            assert!(sources.vertex.contains("uProjectionMatrix"));
            assert!(sources.fragment.contains("void main"));
        }
    }

    #[test]
    fn test_lighting_set_uses_normals() {
        let sources = ShaderLibrary::Builtin.load(ShaderSet::Lighting).unwrap();
        assert!(sources.vertex.contains("aVertexNormal"));
        // The scene feeds the upper 3x3 of the inverse transpose.
        assert!(sources.vertex.contains("uniform mat3 uNormalMatrix;"));
        assert!(sources.fragment.contains("uSampler"));
    }

    #[test]
    fn test_missing_directory_reports_path() {
        let library = ShaderLibrary::new(Some(Path::new("/nonexistent/shaders")));
        let err = library.load(ShaderSet::Quad).unwrap_err();
        assert!(matches!(err, Error::ShaderSource { source: Some(_), .. }));
        assert!(err.to_string().contains("vert.glsl"));
    }

    #[test]
    fn test_directory_library_reads_builtin_tree() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("shaders");
        let from_disk = ShaderLibrary::new(Some(&dir)).load(ShaderSet::Color).unwrap();
        let builtin = ShaderLibrary::Builtin.load(ShaderSet::Color).unwrap();
        assert_eq!(from_disk.vertex, builtin.vertex);
        assert_eq!(from_disk.fragment, builtin.fragment);
    }
}
