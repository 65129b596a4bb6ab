//! Fixed choice catalogs offered by the search forms.

use std::fmt::Display;

use serde::Serialize;

/// Key of a catalog entry. Most catalogs are keyed by a small integer,
/// the state catalog is keyed by its own name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(untagged)]
pub enum ChoiceKey {
    Int(i64),
    Str(&'static str),
}

impl Display for ChoiceKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChoiceKey::Int(i) => write!(f, "{i}"),
            ChoiceKey::Str(s) => write!(f, "{s}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChoiceKeyType {
    Int,
    Str,
}

#[derive(Debug, PartialEq, Eq)]
pub struct Catalog {
    pub key_type: ChoiceKeyType,
    pub options: &'static [(ChoiceKey, &'static str)],
}

impl Catalog {
    pub fn contains(&self, key: &ChoiceKey) -> bool {
        self.options.iter().any(|(k, _)| k == key)
    }

    pub fn label(&self, key: &ChoiceKey) -> Option<&'static str> {
        self.options.iter().find(|(k, _)| k == key).map(|(_, label)| *label)
    }

    pub fn label_for_int(&self, key: i64) -> Option<&'static str> {
        self.label(&ChoiceKey::Int(key))
    }

    /// Parses a submitted string into one of this catalog's keys.
    pub fn parse_key(&self, raw: &str) -> Option<ChoiceKey> {
        let raw = raw.trim();
        match self.key_type {
            ChoiceKeyType::Int => {
                let key = raw.parse::<i64>().ok()?;
                // only the canonical spelling, so "03" and "+3" are not 3
                if key.to_string() != raw {
                    return None;
                }
                let key = ChoiceKey::Int(key);
                self.contains(&key).then_some(key)
            }
            ChoiceKeyType::Str => self
                .options
                .iter()
                .find(|(k, _)| matches!(k, ChoiceKey::Str(s) if *s == raw))
                .map(|(k, _)| *k),
        }
    }
}

macro_rules! int_catalog {
    ($ident:ident, [$(($key:literal, $label:literal)),* $(,)?]) => {
        pub const $ident: Catalog = Catalog {
            key_type: ChoiceKeyType::Int,
            options: &[$((ChoiceKey::Int($key), $label)),*],
        };
    };
}

pub const ESTADO: Catalog = Catalog {
    key_type: ChoiceKeyType::Str,
    options: &[
        (ChoiceKey::Str("Amazonas"), "Amazonas"),
        (ChoiceKey::Str("Anzoategui"), "Anzoategui"),
        (ChoiceKey::Str("Apure"), "Apure"),
        (ChoiceKey::Str("Aragua"), "Aragua"),
        (ChoiceKey::Str("Barinas"), "Barinas"),
        (ChoiceKey::Str("Bolívar"), "Bolívar"),
        (ChoiceKey::Str("Carabobo"), "Carabobo"),
        (ChoiceKey::Str("Cojedes"), "Cojedes"),
        (ChoiceKey::Str("Delta Amacuro"), "Delta Amacuro"),
        (ChoiceKey::Str("Falcón"), "Falcón"),
        (ChoiceKey::Str("Guárico"), "Guárico"),
        (ChoiceKey::Str("Lara"), "Lara"),
        (ChoiceKey::Str("Mérida"), "Mérida"),
        (ChoiceKey::Str("Miranda"), "Miranda"),
        (ChoiceKey::Str("Monagas"), "Monagas"),
        (ChoiceKey::Str("Nueva Esparta"), "Nueva Esparta"),
        (ChoiceKey::Str("Portuguesa"), "Portuguesa"),
        (ChoiceKey::Str("Sucre"), "Sucre"),
        (ChoiceKey::Str("Tachira"), "Tachira"),
        (ChoiceKey::Str("Trujillo"), "Trujillo"),
        (ChoiceKey::Str("Vargas"), "Vargas"),
        (ChoiceKey::Str("Yaracuy"), "Yaracuy"),
        (ChoiceKey::Str("Zulia"), "Zulia"),
    ],
};

int_catalog!(TIPO_MANIFESTACION, [
    (1, "Geoglifo"),
    (2, "Pintura Rupestre"),
    (3, "Petroglifo"),
    (4, "Petroglifo Pintado"),
    (5, "Micro-Petroglifo"),
    (6, "Piedra Mítica Natural"),
    (7, "Cerro Mítico Natural"),
    (8, "Cerro Mitico Natural con Petroglifo"),
    (9, "Cerro Mitico Natural Con Pintura"),
    (10, "Cerro Mitico Natural Con Dolmen"),
    (11, "Monumentos Megalíticos"),
    (12, "Monolitos"),
    (13, "Monolitos Con Grabados"),
    (14, "Menhires"),
    (15, "Menhires Con Puntos Acoplados"),
    (16, "Menhires Con Petroglifo"),
    (17, "Menhires Con Pintura"),
    (18, "Amolador"),
    (19, "Batea"),
    (20, "Puntos Acoplados"),
    (21, "Cupulas"),
    (22, "Mortero o Metate"),
]);

int_catalog!(UBICACION_MANIFESTACION, [
    (1, "Cerro"),
    (2, "Cerro - Cima"),
    (3, "Cerro - Ladera"),
    (4, "Cerro - Fila"),
    (5, "Cerro - Pie de Monte"),
    (6, "Cerro - Barranco"),
    (7, "Cerro - Acantilado"),
    (8, "Valle"),
    (9, "Río"),
    (10, "Río - Lecho"),
    (11, "Río - Margen Derecha"),
    (12, "Río - Margen Izquierda"),
    (13, "Río - Isla"),
    (14, "Río - Raudal"),
    (15, "Costa"),
]);

int_catalog!(ORIENTACION, [
    (1, "Hacia Cerro"),
    (2, "Hacia Valle"),
    (3, "Hacia Rio"),
    (4, "Hacia Costa"),
    (5, "Hacia Cielo"),
]);

int_catalog!(SUELO, [
    (1, "Forestal"),
    (2, "Ganadero"),
    (3, "Agricultura de Riego"),
    (4, "Urbano"),
    (5, "Turístico"),
]);

int_catalog!(LOCALIDAD, [
    (1, "Centro de Poblado"),
    (2, "Urbano"),
    (3, "Rural"),
    (4, "Indigena"),
    (5, "No Poblado"),
]);

int_catalog!(TIPO_YACIMIENTO, [
    (1, "Pared Rocosa"),
    (2, "Roca"),
    (3, "Dolmen(natural)"),
    (4, "Abrigo"),
    (5, "Cueva"),
    (6, "Cueva de Recubrimiento"),
    (7, "Terreno Superficial"),
    (8, "Terreno Profundo"),
]);

int_catalog!(HIDROLOGIA, [
    (1, "Rio"),
    (2, "Laguna"),
    (3, "Arroyo"),
    (4, "Arroyo Perenne"),
    (5, "Manantial"),
    (6, "Manantial Intermitente"),
]);

int_catalog!(EXPOSICION, [
    (1, "Expuesto"),
    (2, "No Expuesto"),
    (3, "Expuesto Periodicamente"),
]);

int_catalog!(FOTOGRAFIA, [
    (1, "Aerea"),
    (2, "No Aerea"),
    (3, "Satelital"),
]);

int_catalog!(MATERIAL, [
    (1, "Roca"),
    (2, "Roca Ignea"),
    (3, "Roca Metamórfica"),
    (4, "Roca Sedimentaria"),
    (5, "Tierra"),
    (6, "Hueso"),
    (7, "Corteza de árbol"),
    (8, "Pieles"),
]);

int_catalog!(TECNICA_PINTURA, [
    (1, "Dedo"),
    (2, "Fibra"),
    (3, "Soplado"),
]);

int_catalog!(TECNICA_PETROGLIFO, [
    (1, "Grabado"),
    (2, "Grabado Percusión"),
    (3, "Grabado Percusión Directa"),
    (4, "Grabado Percusión Indirecta"),
    (5, "Abrasión"),
    (6, "Abrasión Piedra"),
    (7, "Abrasión Arena"),
    (8, "Concha"),
]);

int_catalog!(MONUMENTO, [
    (1, "Monolitos"),
    (2, "Menhires"),
    (3, "Dolmen (artificial)"),
]);

int_catalog!(MANIFESTACIONES_ASOCIADAS, [
    (1, "Lítica"),
    (2, "Cerámica"),
    (3, "Oseo"),
    (4, "Concha"),
    (5, "Carbón No Superficial"),
    (6, "Mitos"),
    (7, "Cementerios"),
    (8, "Montículos"),
]);

/// Comma-separated manifestation labels, in catalog order. Unknown keys are skipped.
pub fn describe_manifestations(keys: &[i64]) -> String {
    TIPO_MANIFESTACION
        .options
        .iter()
        .filter(|(key, _)| matches!(key, ChoiceKey::Int(i) if keys.contains(i)))
        .map(|(_, label)| *label)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_sizes() {
        assert_eq!(ESTADO.options.len(), 23);
        assert_eq!(TIPO_MANIFESTACION.options.len(), 22);
        assert_eq!(ORIENTACION.options.len(), 5);
        assert_eq!(UBICACION_MANIFESTACION.options.len(), 15);
        assert_eq!(TECNICA_PETROGLIFO.options.len(), 8);
    }

    #[test]
    fn test_parse_int_key() {
        assert_eq!(TIPO_MANIFESTACION.parse_key("3"), Some(ChoiceKey::Int(3)));
        assert_eq!(TIPO_MANIFESTACION.parse_key(" 22 "), Some(ChoiceKey::Int(22)));
        assert_eq!(TIPO_MANIFESTACION.parse_key("23"), None);
        assert_eq!(TIPO_MANIFESTACION.parse_key("tres"), None);
    }

    #[test]
    fn test_parse_int_key_needs_canonical_form() {
        assert_eq!(TIPO_MANIFESTACION.parse_key("03"), None);
        assert_eq!(TIPO_MANIFESTACION.parse_key("+3"), None);
        assert_eq!(TIPO_MANIFESTACION.parse_key("3.0"), None);
        assert_eq!(TIPO_MANIFESTACION.parse_key("-3"), None);
    }

    #[test]
    fn test_parse_str_key() {
        assert_eq!(ESTADO.parse_key("Zulia"), Some(ChoiceKey::Str("Zulia")));
        assert_eq!(ESTADO.parse_key("Mérida"), Some(ChoiceKey::Str("Mérida")));
        assert_eq!(ESTADO.parse_key("zulia"), None);
        assert_eq!(ESTADO.parse_key("Distrito Capital"), None);
    }

    #[test]
    fn test_orientation_labels_point_towards() {
        assert_eq!(ORIENTACION.label_for_int(1), Some("Hacia Cerro"));
        assert_eq!(ORIENTACION.label_for_int(5), Some("Hacia Cielo"));
    }

    #[test]
    fn test_describe_manifestations_in_catalog_order() {
        assert_eq!(describe_manifestations(&[3, 1]), "Geoglifo, Petroglifo");
        assert_eq!(describe_manifestations(&[22, 99]), "Mortero o Metate");
        assert_eq!(describe_manifestations(&[]), "");
    }
}
