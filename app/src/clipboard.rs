use anyhow::Result;

#[cfg(feature = "clipboard")]
pub fn copy(text: &str) -> Result<()> {
    use anyhow::Context;

    let mut clipboard = arboard::Clipboard::new().context("Área de transferência indisponível")?;
    clipboard
        .set_text(text.to_string())
        .context("Falha ao copiar para a área de transferência")
}

#[cfg(feature = "clipboard")]
pub fn paste() -> Result<String> {
    use anyhow::Context;

    let mut clipboard = arboard::Clipboard::new().context("Área de transferência indisponível")?;
    clipboard
        .get_text()
        .context("Nada para colar na área de transferência.")
}

#[cfg(not(feature = "clipboard"))]
pub fn copy(_text: &str) -> Result<()> {
    anyhow::bail!("compilado sem suporte à área de transferência (feature `clipboard`)")
}

#[cfg(not(feature = "clipboard"))]
pub fn paste() -> Result<String> {
    anyhow::bail!("compilado sem suporte à área de transferência (feature `clipboard`)")
}

pub fn is_available() -> bool {
    cfg!(feature = "clipboard")
}
