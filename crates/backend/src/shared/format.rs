use chrono::NaiveDate;

/// Formatea un importe como moneda con separador de millares y dos
/// decimales: `1234567.5` -> `"$1,234,567.50"`.
pub fn format_moneda(monto: f64) -> String {
    let negativo = monto < 0.0;
    let centavos = (monto.abs() * 100.0).round() as u64;
    let enteros = centavos / 100;
    let fraccion = centavos % 100;

    let s = enteros.to_string();
    let mut agrupado = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            agrupado.push(',');
        }
        agrupado.push(ch);
    }
    let agrupado: String = agrupado.chars().rev().collect();

    let signo = if negativo { "-" } else { "" };
    format!("{}${}.{:02}", signo, agrupado, fraccion)
}

/// Fecha corta en formato mexicano dd/mm/aaaa
pub fn format_fecha(fecha: NaiveDate) -> String {
    fecha.format("%d/%m/%Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_moneda() {
        assert_eq!(format_moneda(0.0), "$0.00");
        assert_eq!(format_moneda(42.0), "$42.00");
        assert_eq!(format_moneda(999.9), "$999.90");
        assert_eq!(format_moneda(1000.0), "$1,000.00");
        assert_eq!(format_moneda(1234567.5), "$1,234,567.50");
        assert_eq!(format_moneda(-1500.25), "-$1,500.25");
    }

    #[test]
    fn test_format_moneda_redondea_centavos() {
        assert_eq!(format_moneda(0.005), "$0.01");
        assert_eq!(format_moneda(12.344), "$12.34");
    }

    #[test]
    fn test_format_fecha() {
        let f = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
        assert_eq!(format_fecha(f), "07/03/2026");
    }
}
