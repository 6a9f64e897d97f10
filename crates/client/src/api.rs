use async_trait::async_trait;

use contracts::dashboards::d400_resumen_anual::ResumenAnualResponse;
use contracts::domain::a005_nota_venta::dto::NotaDetalleDto;
use contracts::projections::p900_nota_estado::{NotaFiltros, NotaListResponse};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("error de red: {0}")]
    Red(#[from] reqwest::Error),

    #[error("nota de venta no encontrada")]
    NoEncontrada,

    #[error("respuesta del servidor: {0}")]
    Servidor(u16),
}

/// Consultas del listado/detalle de notas. El orquestador es genérico
/// sobre este trait para poder probarse contra un transporte en memoria.
#[async_trait]
pub trait NotasApi: Send + Sync {
    async fn listar_notas(
        &self,
        filtros: &NotaFiltros,
        limit: u64,
        offset: u64,
    ) -> Result<NotaListResponse, ApiError>;

    async fn obtener_detalle(&self, id: &str) -> Result<NotaDetalleDto, ApiError>;

    async fn resumen_anual(&self, anio: Option<i32>) -> Result<ResumenAnualResponse, ApiError>;
}

/// Transporte HTTP contra el backend
pub struct HttpNotasApi {
    base_url: String,
    http: reqwest::Client,
}

impl HttpNotasApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl NotasApi for HttpNotasApi {
    async fn listar_notas(
        &self,
        filtros: &NotaFiltros,
        limit: u64,
        offset: u64,
    ) -> Result<NotaListResponse, ApiError> {
        // sólo los filtros con valor viajan en el query string
        let mut query: Vec<(&str, String)> = vec![
            ("limit", limit.to_string()),
            ("offset", offset.to_string()),
        ];
        if let Some(fecha) = &filtros.fecha_desde {
            query.push(("fecha_desde", fecha.to_string()));
        }
        if let Some(fecha) = &filtros.fecha_hasta {
            query.push(("fecha_hasta", fecha.to_string()));
        }
        if let Some(cliente) = &filtros.cliente_ref {
            if !cliente.is_empty() {
                query.push(("cliente_ref", cliente.clone()));
            }
        }
        if let Some(estado) = &filtros.estado_pago {
            if !estado.is_empty() {
                query.push(("estado_pago", estado.clone()));
            }
        }
        if let Some(estado) = &filtros.estado_entrega {
            if !estado.is_empty() {
                query.push(("estado_entrega", estado.clone()));
            }
        }
        if let Some(estado) = &filtros.estado_credito {
            if !estado.is_empty() {
                query.push(("estado_credito", estado.clone()));
            }
        }

        let url = format!("{}/api/nota_venta/list", self.base_url);
        let response = self.http.get(&url).query(&query).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Servidor(status.as_u16()));
        }

        Ok(response.json().await?)
    }

    async fn obtener_detalle(&self, id: &str) -> Result<NotaDetalleDto, ApiError> {
        let url = format!("{}/api/nota_venta/{}", self.base_url, id);
        let response = self.http.get(&url).send().await?;

        let status = response.status();
        if status.as_u16() == 404 {
            return Err(ApiError::NoEncontrada);
        }
        if !status.is_success() {
            return Err(ApiError::Servidor(status.as_u16()));
        }

        Ok(response.json().await?)
    }

    async fn resumen_anual(&self, anio: Option<i32>) -> Result<ResumenAnualResponse, ApiError> {
        let url = format!("{}/api/d400/resumen_anual", self.base_url);
        let mut request = self.http.get(&url);
        if let Some(anio) = anio {
            request = request.query(&[("anio", anio.to_string())]);
        }
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Servidor(status.as_u16()));
        }

        Ok(response.json().await?)
    }
}
