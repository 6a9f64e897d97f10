use axum::{extract::Query, Json};

use contracts::dashboards::d400_resumen_anual::{
    DesempenoVendedoresResponse, ResumenAnualRequest, ResumenAnualResponse,
};

use crate::dashboards::d400_resumen_anual;

/// GET /api/d400/resumen_anual?anio=YYYY
pub async fn get_resumen_anual(
    Query(req): Query<ResumenAnualRequest>,
) -> Result<Json<ResumenAnualResponse>, axum::http::StatusCode> {
    match d400_resumen_anual::service::get_resumen_anual(req.anio).await {
        Ok(resumen) => Ok(Json(resumen)),
        Err(e) => {
            tracing::error!("Failed to build resumen anual: {}", e);
            Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/d400/desempeno_vendedores?anio=YYYY
pub async fn get_desempeno_vendedores(
    Query(req): Query<ResumenAnualRequest>,
) -> Result<Json<DesempenoVendedoresResponse>, axum::http::StatusCode> {
    match d400_resumen_anual::service::get_desempeno_vendedores(req.anio).await {
        Ok(desempeno) => Ok(Json(desempeno)),
        Err(e) => {
            tracing::error!("Failed to build desempeño de vendedores: {}", e);
            Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
