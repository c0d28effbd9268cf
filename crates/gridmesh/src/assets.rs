use bevy::asset::io::Reader;
use bevy::asset::{AssetLoader, LoadContext};
use bevy::prelude::*;
use bevy::reflect::TypePath;
use thiserror::Error;

use crate::types::{HeightColorRamp, RampError};

#[derive(Asset, TypePath, Debug, Clone)]
pub struct ColorRampAsset(pub HeightColorRamp);

#[derive(Debug, Error)]
pub enum RampLoadError {
    #[error("failed to read color ramp bytes: {0}")]
    Io(#[from] std::io::Error),
    #[error("color ramp file was not valid utf-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    #[error("failed to parse color ramp ron: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error(transparent)]
    Invalid(#[from] RampError),
}

#[derive(Default)]
pub struct ColorRampAssetLoader;

impl AssetLoader for ColorRampAssetLoader {
    type Asset = ColorRampAsset;
    type Settings = ();
    type Error = RampLoadError;

    async fn load(
        &self,
        reader: &mut dyn Reader,
        _settings: &Self::Settings,
        _load_context: &mut LoadContext<'_>,
    ) -> Result<Self::Asset, Self::Error> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes).await?;

        let text = std::str::from_utf8(&bytes)?;
        let ramp: HeightColorRamp = ron::from_str(text)?;
        ramp.validate()?;

        Ok(ColorRampAsset(ramp))
    }

    fn extensions(&self) -> &[&str] {
        &["ron"]
    }
}
