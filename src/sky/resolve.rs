use alloc::string::String;

/// Directory the viewer serves sky themes from
pub const SKY_ASSET_ROOT: &str = "./assets/sky";

/// One side of a sky cube, in the order renderers expect them
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum SkyFace {
    Front,
    Back,
    Up,
    Down,
    Right,
    Left,
}

impl SkyFace {
    pub const ALL: [SkyFace; 6] = [
        SkyFace::Front,
        SkyFace::Back,
        SkyFace::Up,
        SkyFace::Down,
        SkyFace::Right,
        SkyFace::Left,
    ];

    /// File stem of the face's image
    pub fn stem(self) -> &'static str {
        match self {
            SkyFace::Front => "ft",
            SkyFace::Back => "bk",
            SkyFace::Up => "up",
            SkyFace::Down => "dn",
            SkyFace::Right => "rt",
            SkyFace::Left => "lf",
        }
    }
}

/// Paths of the six cube faces, front, back, up, down, right, left
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct SkyboxFaceSet {
    paths: [String; 6],
}

impl SkyboxFaceSet {
    pub fn paths(&self) -> &[String; 6] {
        &self.paths
    }

    pub fn face(&self, face: SkyFace) -> &str {
        &self.paths[face as usize]
    }

    pub fn into_paths(self) -> [String; 6] {
        self.paths
    }

    pub fn iter(&self) -> impl Iterator<Item = (SkyFace, &str)> {
        SkyFace::ALL
            .into_iter()
            .zip(self.paths.iter().map(String::as_str))
    }
}

impl<'a> IntoIterator for &'a SkyboxFaceSet {
    type Item = &'a String;
    type IntoIter = core::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.iter()
    }
}

/// Face image paths for sky `theme`, e.g. `./assets/sky/indigo/ft.png`.
/// Nothing is checked against the file system.
pub fn resolve_skybox_paths(theme: &str, extension: &str) -> SkyboxFaceSet {
    resolve_skybox_paths_in(SKY_ASSET_ROOT, theme, extension)
}

/// As [`resolve_skybox_paths`], under a different asset root
pub fn resolve_skybox_paths_in(
    root: &str,
    theme: &str,
    extension: &str,
) -> SkyboxFaceSet {
    let root = root.trim_end_matches('/');

    SkyboxFaceSet {
        paths: SkyFace::ALL.map(|face| {
            format!("{root}/{theme}/{}.{extension}", face.stem())
        }),
    }
}
