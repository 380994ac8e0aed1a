//! Wavefront OBJ import.
//!
//! Only geometry is read. `mtllib` references are ignored: surface
//! materials come from the scene description, not from MTL files.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{LoadError, LoadResult};
use crate::mesh::MeshData;

fn load_options() -> tobj::LoadOptions {
    tobj::LoadOptions {
        single_index: true,
        triangulate: true,
        ..Default::default()
    }
}

/// Load every model of an OBJ file as a triangulated `MeshData`.
///
/// Unnamed models take the file stem as their name.
pub fn load_obj<P: AsRef<Path>>(path: P) -> LoadResult<Vec<MeshData>> {
    let path = path.as_ref();
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("unnamed");

    let mut reader = BufReader::new(File::open(path)?);
    let meshes = parse_obj(&mut reader, name)?;

    log::info!(
        "Loaded {} meshes ({} triangles) from {}",
        meshes.len(),
        meshes.iter().map(MeshData::triangle_count).sum::<usize>(),
        path.display()
    );

    Ok(meshes)
}

/// Parse OBJ text from any buffered reader.
///
/// `fallback_name` names models the file leaves unnamed. Fails with
/// `LoadError::NoGeometry` when the input holds no faces at all.
pub fn parse_obj<R: BufRead>(reader: &mut R, fallback_name: &str) -> LoadResult<Vec<MeshData>> {
    let (models, _materials) = tobj::load_obj_buf(reader, &load_options(), |_| {
        Err(tobj::LoadError::GenericFailure)
    })?;

    let meshes: Vec<MeshData> = models
        .into_iter()
        .filter(|model| !model.mesh.indices.is_empty())
        .map(|model| {
            let name = if model.name.is_empty() || model.name == "unnamed_object" {
                fallback_name.to_string()
            } else {
                model.name
            };
            MeshData::from_flat(name, &model.mesh.positions, model.mesh.indices)
        })
        .collect();

    if meshes.is_empty() {
        return Err(LoadError::NoGeometry(fallback_name.to_string()));
    }

    Ok(meshes)
}
