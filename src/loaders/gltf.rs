use anyhow::{anyhow, Context, Result};
use futures::channel::oneshot;
use glam::{Mat4, Vec3};
use std::path::{Path, PathBuf};
use std::thread;

use crate::config::ModelSpec;
use crate::core::boundary::Boundary;

/// Summary of an imported model, placed in the world
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedModel {
    pub path: PathBuf,
    pub placement: Vec3,
    pub scenes: usize,
    pub nodes: usize,
    pub meshes: usize,
    pub vertices: usize,
    /// World-space bounds of all primitives, if any geometry was found
    pub bounds: Option<(Vec3, Vec3)>,
}

impl LoadedModel {
    /// Horizontal footprint of the model on the XZ plane
    pub fn footprint(&self) -> Option<Boundary> {
        self.bounds
            .map(|(min, max)| Boundary::new(min.x, max.x, min.z, max.z))
    }
}

/// Loads a glTF file and summarises its geometry at `placement`
pub fn load_gltf_model(path: impl AsRef<Path>, placement: Vec3) -> Result<LoadedModel> {
    let path = path.as_ref();
    log::debug!("Loading glTF file: {:?}", path);

    let (gltf, _buffers, _images) =
        gltf::import(path).context(format!("Failed to load glTF file: {:?}", path))?;

    let mut model = LoadedModel {
        path: path.to_path_buf(),
        placement,
        scenes: gltf.scenes().count(),
        nodes: gltf.nodes().count(),
        meshes: gltf.meshes().count(),
        vertices: 0,
        bounds: None,
    };

    let root = Mat4::from_translation(placement);
    for scene in gltf.scenes() {
        for node in scene.nodes() {
            process_node(&node, &root, &mut model);
        }
    }

    if model.bounds.is_none() {
        log::warn!("No geometry found in glTF file {:?}", path);
    }
    Ok(model)
}

/// Recursively processes glTF nodes
fn process_node(node: &gltf::Node, parent_transform: &Mat4, model: &mut LoadedModel) {
    let local_transform = Mat4::from_cols_array_2d(&node.transform().matrix());
    let global_transform = *parent_transform * local_transform;

    if let Some(mesh) = node.mesh() {
        for primitive in mesh.primitives() {
            if let Some(positions) = primitive.get(&gltf::Semantic::Positions) {
                model.vertices += positions.count();
            }
            let bb = primitive.bounding_box();
            extend_bounds(model, &global_transform, Vec3::from(bb.min), Vec3::from(bb.max));
        }
    }

    for child in node.children() {
        process_node(&child, &global_transform, model);
    }
}

/// Grow the model bounds by the transformed corners of a local box
fn extend_bounds(model: &mut LoadedModel, transform: &Mat4, min: Vec3, max: Vec3) {
    for i in 0..8 {
        let corner = Vec3::new(
            if i & 1 == 0 { min.x } else { max.x },
            if i & 2 == 0 { min.y } else { max.y },
            if i & 4 == 0 { min.z } else { max.z },
        );
        let p = transform.transform_point3(corner);
        model.bounds = Some(match model.bounds {
            Some((lo, hi)) => (lo.min(p), hi.max(p)),
            None => (p, p),
        });
    }
}

/// In-flight background load; poll it from the frame loop
#[derive(Debug)]
pub struct PendingModel {
    path: PathBuf,
    receiver: oneshot::Receiver<Result<LoadedModel>>,
}

impl PendingModel {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Non-blocking check; `Some` once the load has finished either way
    pub fn poll_ready(&mut self) -> Option<Result<LoadedModel>> {
        match self.receiver.try_recv() {
            Ok(Some(result)) => Some(result),
            Ok(None) => None,
            Err(oneshot::Canceled) => Some(Err(anyhow!(
                "Loader thread for {:?} exited without a result",
                self.path
            ))),
        }
    }

    /// Block until the load finishes
    pub fn wait(self) -> Result<LoadedModel> {
        futures::executor::block_on(self.receiver)
            .map_err(|_| anyhow!("Loader thread for {:?} exited without a result", self.path))?
    }
}

/// Spawns one background thread per model
#[derive(Debug, Default, Clone, Copy)]
pub struct ModelLoader;

impl ModelLoader {
    pub fn new() -> Self {
        Self
    }

    pub fn load(&self, spec: &ModelSpec) -> Result<PendingModel> {
        let (sender, receiver) = oneshot::channel();
        let path = spec.path.clone();
        let placement = spec.position;
        let thread_path = path.clone();

        thread::Builder::new()
            .name("model-loader".into())
            .spawn(move || {
                // The receiver may be gone if the app already exited
                let _ = sender.send(load_gltf_model(&thread_path, placement));
            })
            .context("Failed to spawn model loader thread")?;

        Ok(PendingModel { path, receiver })
    }
}
