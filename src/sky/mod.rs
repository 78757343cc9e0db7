mod resolve;

pub use resolve::{
    resolve_skybox_paths, resolve_skybox_paths_in, SkyFace, SkyboxFaceSet,
    SKY_ASSET_ROOT,
};
