use std::path::Path;

use crate::data_structures::texture::Texture;

pub async fn load_string(file_name: &str) -> anyhow::Result<String> {
    let path = Path::new("./").join("assets").join(file_name);
    let txt = tokio::fs::read_to_string(path).await?;
    Ok(txt)
}

pub async fn load_binary(file_name: &str) -> anyhow::Result<Vec<u8>> {
    let path = Path::new("./").join("assets").join(file_name);
    let data = tokio::fs::read(path).await?;
    Ok(data)
}

pub async fn load_texture(
    file_name: &str,
    device: &wgpu::Device,
    queue: &wgpu::Queue,
) -> anyhow::Result<Texture> {
    let data = load_binary(file_name).await?;
    Texture::from_bytes(device, queue, &data, file_name)
}
