//! Container inventory adapter
//!
//! Lists, inspects, stops and removes containers in the external runtime.
//! All calls block until the runtime answers. `stop` must precede `remove`.

mod docker;

pub use docker::DockerCli;

use crate::error::Result;

pub trait ContainerInventory {
    /// Names of all containers, running or not
    fn list_names(&self) -> Result<Vec<String>>;
    /// Whether a container with exactly this name exists
    fn exists(&self, name: &str) -> Result<bool>;
    /// Whether an image repository is already present locally
    fn image_present(&self, image: &str) -> Result<bool>;
    fn stop(&self, name: &str) -> Result<()>;
    fn remove(&self, name: &str) -> Result<()>;
}

impl<I: ContainerInventory + ?Sized> ContainerInventory for &I {
    fn list_names(&self) -> Result<Vec<String>> {
        (**self).list_names()
    }

    fn exists(&self, name: &str) -> Result<bool> {
        (**self).exists(name)
    }

    fn image_present(&self, image: &str) -> Result<bool> {
        (**self).image_present(image)
    }

    fn stop(&self, name: &str) -> Result<()> {
        (**self).stop(name)
    }

    fn remove(&self, name: &str) -> Result<()> {
        (**self).remove(name)
    }
}

/// Repository part of an image reference: `nginx:latest` -> `nginx`,
/// `registry:5000/app:1` -> `registry:5000/app`, digests dropped.
pub fn image_repository(image: &str) -> &str {
    let without_digest = image.split('@').next().unwrap_or(image);
    match without_digest.rfind(':') {
        Some(idx) if !without_digest[idx + 1..].contains('/') => &without_digest[..idx],
        _ => without_digest,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_repository() {
        assert_eq!(image_repository("nginx"), "nginx");
        assert_eq!(image_repository("nginx:latest"), "nginx");
        assert_eq!(image_repository("library/redis:7"), "library/redis");
        assert_eq!(image_repository("registry:5000/app"), "registry:5000/app");
        assert_eq!(image_repository("registry:5000/app:1.2"), "registry:5000/app");
        assert_eq!(image_repository("alpine@sha256:abcd"), "alpine");
    }
}
