// src/services/imagem_service.rs

use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use tokio::{fs, io::AsyncWriteExt};
use uuid::Uuid;

use crate::common::{error::AppError, notificador::Notificador};

pub const IMAGEM_OBRIGATORIA: &str = "Forneça uma imagem para este produto!";
pub const BASE64_INVALIDO: &str = "A imagem fornecida não está em base64 válido.";
pub const ARQUIVO_EXISTENTE: &str = "Já existe um arquivo com este nome!";
pub const NOME_INVALIDO: &str = "O nome do arquivo da imagem é inválido.";
pub const NOME_LONGO: &str = "O nome do arquivo da imagem excede 255 caracteres.";

/// Tamanho da coluna `produtos.imagem`.
pub const TAMANHO_MAXIMO_NOME: usize = 255;

/// Grava as imagens dos produtos num diretório local.
///
/// Um arquivo existente nunca é sobrescrito: a criação usa `create_new`, então
/// dois uploads simultâneos com o mesmo nome não se atropelam.
#[derive(Debug, Clone)]
pub struct ImagemStorage {
    diretorio: PathBuf,
}

impl ImagemStorage {
    pub fn new(diretorio: impl Into<PathBuf>) -> Self {
        Self {
            diretorio: diretorio.into(),
        }
    }

    pub fn diretorio(&self) -> &Path {
        &self.diretorio
    }

    /// Upload vindo do JSON (`imagemUpload` em base64).
    pub async fn upload_base64(
        &self,
        conteudo: &str,
        nome_arquivo: &str,
        notificador: &mut Notificador,
    ) -> Result<bool, AppError> {
        let conteudo = conteudo.trim();
        if conteudo.is_empty() {
            notificador.notify(IMAGEM_OBRIGATORIA);
            return Ok(false);
        }

        let bytes = match STANDARD.decode(conteudo) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::debug!("Base64 inválido: {}", e);
                notificador.notify(BASE64_INVALIDO);
                return Ok(false);
            }
        };

        self.upload_bytes(&bytes, nome_arquivo, notificador).await
    }

    /// Upload vindo do multipart (bytes crus).
    pub async fn upload_bytes(
        &self,
        bytes: &[u8],
        nome_arquivo: &str,
        notificador: &mut Notificador,
    ) -> Result<bool, AppError> {
        if bytes.is_empty() {
            notificador.notify(IMAGEM_OBRIGATORIA);
            return Ok(false);
        }

        let Some(nome) = nome_seguro(nome_arquivo) else {
            notificador.notify(NOME_INVALIDO);
            return Ok(false);
        };

        if nome.chars().count() > TAMANHO_MAXIMO_NOME {
            notificador.notify(NOME_LONGO);
            return Ok(false);
        }

        fs::create_dir_all(&self.diretorio).await?;
        let caminho = self.diretorio.join(nome);

        let mut arquivo = match fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&caminho)
            .await
        {
            Ok(arquivo) => arquivo,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                notificador.notify(ARQUIVO_EXISTENTE);
                return Ok(false);
            }
            Err(e) => return Err(e.into()),
        };

        arquivo.write_all(bytes).await?;
        arquivo.flush().await?;

        tracing::info!(arquivo = %caminho.display(), tamanho = bytes.len(), "Imagem gravada");
        Ok(true)
    }

    /// Apaga uma imagem gravada para um produto que acabou não sendo salvo.
    pub async fn remover(&self, nome_arquivo: &str) -> Result<(), AppError> {
        let Some(nome) = nome_seguro(nome_arquivo) else {
            return Ok(());
        };

        let caminho = self.diretorio.join(nome);
        match fs::remove_file(&caminho).await {
            Ok(()) => {
                tracing::info!(arquivo = %caminho.display(), "Imagem descartada");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// `"<guid>_<nome>"`: nome gravado para um upload novo.
pub fn nome_com_prefixo(nome_original: &str) -> String {
    format!("{}_{}", Uuid::new_v4(), nome_seguro(nome_original).unwrap_or_default())
}

// Só o último componente: "../../etc/passwd" vira "passwd"
fn nome_seguro(nome_arquivo: &str) -> Option<&str> {
    nome_arquivo
        .rsplit(['/', '\\'])
        .next()
        .map(str::trim)
        .filter(|nome| !nome.is_empty() && *nome != "." && *nome != "..")
}
