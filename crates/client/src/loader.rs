//! Orquestador de paginación del listado de notas.
//!
//! Paginación por offset con página fija de 15 renglones. Una página que
//! falla deja intactos los renglones ya cargados; el usuario reintenta con
//! otra llamada. Como cada carga se espera bajo `&mut self`, una respuesta
//! rezagada no puede pisar estado más nuevo.

use contracts::projections::p900_nota_estado::{NotaFiltros, NotaResumenDto};

use crate::api::NotasApi;

/// Tamaño de página del listado
pub const PAGE_SIZE: u64 = 15;

pub struct NotasLoader<A: NotasApi> {
    api: A,
    pub notas: Vec<NotaResumenDto>,
    pub total_count: i64,
    pub offset: u64,
    pub has_more: bool,
    pub loading: bool,
    pub error: Option<String>,
    filtros: NotaFiltros,
}

impl<A: NotasApi> NotasLoader<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            notas: Vec::new(),
            total_count: 0,
            offset: 0,
            has_more: true,
            loading: false,
            error: None,
            filtros: NotaFiltros::default(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn filtros(&self) -> &NotaFiltros {
        &self.filtros
    }

    /// Trae la siguiente página y la anexa; no hace nada si ya hay una
    /// carga en curso o no quedan más renglones.
    pub async fn load_more(&mut self) {
        if self.loading || !self.has_more {
            return;
        }
        self.fetch_page(PAGE_SIZE).await;
    }

    /// Sustituye el juego de filtros y recarga desde el offset cero
    pub async fn apply_filters(&mut self, filtros: NotaFiltros) {
        self.filtros = filtros;
        self.reiniciar();
        self.fetch_page(PAGE_SIZE).await;
    }

    pub async fn reset_filters(&mut self) {
        self.apply_filters(NotaFiltros::default()).await;
    }

    /// Recarga la primera página con los filtros vigentes; sólo sustituye
    /// los renglones si la consulta tuvo éxito.
    pub async fn refresh(&mut self) {
        if self.loading {
            return;
        }
        self.loading = true;
        self.error = None;

        match self.api.listar_notas(&self.filtros, PAGE_SIZE, 0).await {
            Ok(respuesta) => {
                self.offset = respuesta.items.len() as u64;
                self.total_count = respuesta.total_count;
                self.has_more = respuesta.has_more;
                self.notas = respuesta.items;
            }
            Err(e) => {
                self.error = Some(e.to_string());
            }
        }

        self.loading = false;
    }

    /// Ruta de restauración al regresar de un detalle: pagina hasta juntar
    /// `target` renglones (nunca más) o hasta agotar el conjunto.
    pub async fn load_notas_with_count(&mut self, target: usize) {
        while self.notas.len() < target && self.has_more {
            let restante = (target - self.notas.len()) as u64;
            let antes = self.notas.len();

            self.fetch_page(restante.min(PAGE_SIZE)).await;

            if self.error.is_some() || self.notas.len() == antes {
                break;
            }
        }
    }

    async fn fetch_page(&mut self, limit: u64) {
        self.loading = true;
        self.error = None;

        match self.api.listar_notas(&self.filtros, limit, self.offset).await {
            Ok(respuesta) => {
                self.offset += respuesta.items.len() as u64;
                self.total_count = respuesta.total_count;
                self.has_more = respuesta.has_more;
                self.notas.extend(respuesta.items);
            }
            Err(e) => {
                // los renglones ya cargados se conservan
                self.error = Some(e.to_string());
            }
        }

        self.loading = false;
    }

    fn reiniciar(&mut self) {
        self.notas.clear();
        self.offset = 0;
        self.total_count = 0;
        self.has_more = true;
        self.error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, NotasApi};
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use contracts::dashboards::d400_resumen_anual::ResumenAnualResponse;
    use contracts::domain::a005_nota_venta::dto::NotaDetalleDto;
    use contracts::enums::{EstadoCredito, EstadoEntrega, EstadoPago};
    use contracts::projections::p900_nota_estado::NotaListResponse;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;

    fn nota(i: usize) -> NotaResumenDto {
        // los pares quedan pagados para poder filtrar por estado
        let pagada = i % 2 == 0;
        NotaResumenDto {
            id: format!("nota-{i}"),
            folio: format!("NV-{i:04}"),
            fecha: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            cliente_ref: "cliente-1".into(),
            cliente_nombre: "Empaques del Norte".into(),
            total: 1000.0,
            total_pagado: if pagada { 1000.0 } else { 0.0 },
            saldo: if pagada { 0.0 } else { 1000.0 },
            porcentaje_pagado: if pagada { 100.0 } else { 0.0 },
            estado_pago: if pagada {
                EstadoPago::Pagado
            } else {
                EstadoPago::Pendiente
            },
            partidas_total: 1,
            partidas_entregadas: 0,
            porcentaje_entrega: 0.0,
            estado_entrega: EstadoEntrega::Pendiente,
            fecha_vencimiento: NaiveDate::from_ymd_opt(2026, 1, 31).unwrap(),
            dias_restantes: 10,
            porcentaje_credito: 33.3,
            estado_credito: EstadoCredito::Vigente,
        }
    }

    struct FakeApi {
        notas: Vec<NotaResumenDto>,
        fallar: AtomicBool,
        llamadas: Mutex<Vec<(u64, u64)>>,
    }

    impl FakeApi {
        fn with_count(n: usize) -> Self {
            Self {
                notas: (0..n).map(nota).collect(),
                fallar: AtomicBool::new(false),
                llamadas: Mutex::new(Vec::new()),
            }
        }

        fn llamadas(&self) -> Vec<(u64, u64)> {
            self.llamadas.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl NotasApi for FakeApi {
        async fn listar_notas(
            &self,
            filtros: &NotaFiltros,
            limit: u64,
            offset: u64,
        ) -> Result<NotaListResponse, ApiError> {
            self.llamadas.lock().unwrap().push((limit, offset));

            if self.fallar.load(Ordering::SeqCst) {
                return Err(ApiError::Servidor(500));
            }

            let filtradas: Vec<NotaResumenDto> = self
                .notas
                .iter()
                .filter(|n| match filtros.estado_pago.as_deref() {
                    Some(code) => n.estado_pago.code() == code,
                    None => true,
                })
                .cloned()
                .collect();

            let total_count = filtradas.len() as i64;
            let items: Vec<NotaResumenDto> = filtradas
                .into_iter()
                .skip(offset as usize)
                .take(limit as usize)
                .collect();
            let has_more = total_count > offset as i64 + items.len() as i64;

            Ok(NotaListResponse {
                items,
                total_count,
                has_more,
            })
        }

        async fn obtener_detalle(&self, _id: &str) -> Result<NotaDetalleDto, ApiError> {
            Err(ApiError::NoEncontrada)
        }

        async fn resumen_anual(
            &self,
            anio: Option<i32>,
        ) -> Result<ResumenAnualResponse, ApiError> {
            Ok(ResumenAnualResponse {
                anio: anio.unwrap_or(2026),
                total_notas: self.notas.len() as i64,
                notas_pagadas: 0,
                notas_entregadas: 0,
                credito_vencido: 0,
            })
        }
    }

    #[tokio::test]
    async fn test_carga_paginada() {
        let mut loader = NotasLoader::new(FakeApi::with_count(40));

        loader.load_more().await;
        assert_eq!(loader.notas.len(), 15);
        assert_eq!(loader.total_count, 40);
        assert!(loader.has_more);

        loader.load_more().await;
        assert_eq!(loader.notas.len(), 30);
        assert!(loader.has_more);

        loader.load_more().await;
        assert_eq!(loader.notas.len(), 40);
        assert!(!loader.has_more);

        assert_eq!(loader.api().llamadas(), vec![(15, 0), (15, 15), (15, 30)]);
    }

    #[tokio::test]
    async fn test_no_consulta_agotado_el_conjunto() {
        let mut loader = NotasLoader::new(FakeApi::with_count(10));

        loader.load_more().await;
        assert_eq!(loader.notas.len(), 10);
        assert!(!loader.has_more);

        // sin más renglones ya no debe ir a la red
        loader.load_more().await;
        assert_eq!(loader.api().llamadas().len(), 1);
    }

    #[tokio::test]
    async fn test_apply_filters_reinicia_el_offset() {
        let mut loader = NotasLoader::new(FakeApi::with_count(40));

        loader.load_more().await;
        loader.load_more().await;
        assert_eq!(loader.offset, 30);

        loader
            .apply_filters(NotaFiltros {
                estado_pago: Some("pagado".into()),
                ..Default::default()
            })
            .await;

        // la consulta posterior al cambio de filtros parte de offset 0
        assert_eq!(loader.api().llamadas().last(), Some(&(15, 0)));
        assert_eq!(loader.total_count, 20);
        assert!(loader
            .notas
            .iter()
            .all(|n| n.estado_pago == EstadoPago::Pagado));
    }

    #[tokio::test]
    async fn test_reset_filters_limpia_el_juego() {
        let mut loader = NotasLoader::new(FakeApi::with_count(40));

        loader
            .apply_filters(NotaFiltros {
                estado_pago: Some("pagado".into()),
                ..Default::default()
            })
            .await;
        assert_eq!(loader.total_count, 20);

        loader.reset_filters().await;
        assert_eq!(loader.filtros(), &NotaFiltros::default());
        assert_eq!(loader.total_count, 40);
        assert_eq!(loader.notas.len(), 15);
    }

    #[tokio::test]
    async fn test_error_conserva_lo_cargado() {
        let loader_api = FakeApi::with_count(40);
        let mut loader = NotasLoader::new(loader_api);

        loader.load_more().await;
        assert_eq!(loader.notas.len(), 15);

        loader.api().fallar.store(true, Ordering::SeqCst);
        loader.load_more().await;
        assert!(loader.error.is_some());
        assert_eq!(loader.notas.len(), 15);
        assert_eq!(loader.offset, 15);

        // el reintento manual continúa donde quedó
        loader.api().fallar.store(false, Ordering::SeqCst);
        loader.load_more().await;
        assert!(loader.error.is_none());
        assert_eq!(loader.notas.len(), 30);
    }

    #[tokio::test]
    async fn test_load_notas_with_count_junta_exactamente_el_objetivo() {
        let mut loader = NotasLoader::new(FakeApi::with_count(100));

        loader.load_notas_with_count(45).await;
        assert_eq!(loader.notas.len(), 45);
        assert!(loader.has_more);

        // un objetivo que no es múltiplo de la página acorta la última consulta
        let mut loader = NotasLoader::new(FakeApi::with_count(100));
        loader.load_notas_with_count(20).await;
        assert_eq!(loader.notas.len(), 20);
        assert_eq!(loader.api().llamadas(), vec![(15, 0), (5, 15)]);
    }

    #[tokio::test]
    async fn test_load_notas_with_count_tolera_objetivo_mayor_al_conjunto() {
        let mut loader = NotasLoader::new(FakeApi::with_count(10));

        loader.load_notas_with_count(45).await;
        assert_eq!(loader.notas.len(), 10);
        assert!(!loader.has_more);
    }

    #[tokio::test]
    async fn test_refresh_sustituye_renglones() {
        let mut loader = NotasLoader::new(FakeApi::with_count(40));

        loader.load_more().await;
        loader.load_more().await;
        assert_eq!(loader.notas.len(), 30);

        loader.refresh().await;
        assert_eq!(loader.notas.len(), 15);
        assert_eq!(loader.offset, 15);
        assert_eq!(loader.total_count, 40);
        assert!(loader.has_more);
    }

    #[tokio::test]
    async fn test_refresh_fallido_conserva_renglones() {
        let mut loader = NotasLoader::new(FakeApi::with_count(40));

        loader.load_more().await;
        loader.api().fallar.store(true, Ordering::SeqCst);

        loader.refresh().await;
        assert!(loader.error.is_some());
        assert_eq!(loader.notas.len(), 15);
    }
}
