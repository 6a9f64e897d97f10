use serde::{Deserialize, Serialize};

/// Estado de cobranza de una nota de venta
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EstadoPago {
    Pagado,
    Parcial,
    Pendiente,
}

impl EstadoPago {
    /// Código tal como se persiste en la vista de estados y se filtra
    pub fn code(&self) -> &'static str {
        match self {
            EstadoPago::Pagado => "pagado",
            EstadoPago::Parcial => "parcial",
            EstadoPago::Pendiente => "pendiente",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            EstadoPago::Pagado => "Pagado",
            EstadoPago::Parcial => "Pago parcial",
            EstadoPago::Pendiente => "Pendiente de pago",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "pagado" => Some(EstadoPago::Pagado),
            "parcial" => Some(EstadoPago::Parcial),
            "pendiente" => Some(EstadoPago::Pendiente),
            _ => None,
        }
    }

    pub fn all() -> Vec<EstadoPago> {
        vec![EstadoPago::Pagado, EstadoPago::Parcial, EstadoPago::Pendiente]
    }
}

/// Estado de entrega de las partidas de una nota
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EstadoEntrega {
    Completa,
    Parcial,
    Pendiente,
}

impl EstadoEntrega {
    pub fn code(&self) -> &'static str {
        match self {
            EstadoEntrega::Completa => "completa",
            EstadoEntrega::Parcial => "parcial",
            EstadoEntrega::Pendiente => "pendiente",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            EstadoEntrega::Completa => "Entrega completa",
            EstadoEntrega::Parcial => "Entrega parcial",
            EstadoEntrega::Pendiente => "Sin entregas",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "completa" => Some(EstadoEntrega::Completa),
            "parcial" => Some(EstadoEntrega::Parcial),
            "pendiente" => Some(EstadoEntrega::Pendiente),
            _ => None,
        }
    }

    pub fn all() -> Vec<EstadoEntrega> {
        vec![
            EstadoEntrega::Completa,
            EstadoEntrega::Parcial,
            EstadoEntrega::Pendiente,
        ]
    }
}

/// Estado del plazo de crédito de una nota
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EstadoCredito {
    Vigente,
    PorVencer,
    Vencido,
}

impl EstadoCredito {
    pub fn code(&self) -> &'static str {
        match self {
            EstadoCredito::Vigente => "vigente",
            EstadoCredito::PorVencer => "por_vencer",
            EstadoCredito::Vencido => "vencido",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            EstadoCredito::Vigente => "Crédito vigente",
            EstadoCredito::PorVencer => "Por vencer",
            EstadoCredito::Vencido => "Crédito vencido",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "vigente" => Some(EstadoCredito::Vigente),
            "por_vencer" => Some(EstadoCredito::PorVencer),
            "vencido" => Some(EstadoCredito::Vencido),
            _ => None,
        }
    }

    pub fn all() -> Vec<EstadoCredito> {
        vec![
            EstadoCredito::Vigente,
            EstadoCredito::PorVencer,
            EstadoCredito::Vencido,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_roundtrip() {
        for e in EstadoPago::all() {
            assert_eq!(EstadoPago::from_code(e.code()), Some(e));
        }
        for e in EstadoEntrega::all() {
            assert_eq!(EstadoEntrega::from_code(e.code()), Some(e));
        }
        for e in EstadoCredito::all() {
            assert_eq!(EstadoCredito::from_code(e.code()), Some(e));
        }
        assert_eq!(EstadoPago::from_code("otro"), None);
    }

    #[test]
    fn test_serde_uses_codes() {
        assert_eq!(
            serde_json::to_string(&EstadoCredito::PorVencer).unwrap(),
            "\"por_vencer\""
        );
        assert_eq!(
            serde_json::from_str::<EstadoPago>("\"pagado\"").unwrap(),
            EstadoPago::Pagado
        );
    }
}
