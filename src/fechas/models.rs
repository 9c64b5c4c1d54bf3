use chrono::{DateTime, NaiveDate, Utc};
use diesel::pg::Pg;
use diesel::prelude::*;

use crate::db;
use crate::errors::ServiceError;
use crate::partidos::models::{Partido, PartidoResponse};
use crate::schema::fechas;

/// A match day: a calendar date grouping a handful of partidos
#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Identifiable)]
#[table_name = "fechas"]
pub struct Fecha {
    pub id: i32,
    pub fecha: NaiveDate,
    pub nombre: Option<String>,
    pub descripcion: Option<String>,
    pub activa: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, Insertable)]
#[table_name = "fechas"]
pub struct NuevaFecha {
    pub fecha: NaiveDate,
    pub nombre: Option<String>,
    pub descripcion: Option<String>,
}

#[derive(Debug, Deserialize, AsChangeset)]
#[table_name = "fechas"]
pub struct UpdateFecha {
    pub fecha: Option<NaiveDate>,
    pub nombre: Option<String>,
    pub descripcion: Option<String>,
    pub activa: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct FechaFilter {
    pub activa: Option<bool>,
    /// embed each fecha's partidos and their resultados
    #[serde(rename = "includePartidos")]
    pub include_partidos: Option<bool>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl FechaFilter {
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(10).max(1).min(100)
    }

    pub fn include_partidos(&self) -> bool {
        self.include_partidos.unwrap_or(false)
    }
}

/// A fecha as returned by the api, optionally with its partidos embedded
#[derive(Debug, Serialize)]
pub struct FechaResponse {
    #[serde(flatten)]
    pub fecha: Fecha,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partidos: Option<Vec<PartidoResponse>>,
}

impl Fecha {
    pub fn find_all(filter: &FechaFilter, conn: &db::Conn) -> Result<Vec<Fecha>, ServiceError> {
        let mut query = fechas::table.into_boxed::<Pg>();

        if let Some(activa) = filter.activa {
            query = query.filter(fechas::activa.eq(activa));
        }

        let fechas = query
            .order(fechas::fecha.desc())
            .limit(filter.limit())
            .offset((filter.page() - 1) * filter.limit())
            .load(conn)?;

        Ok(fechas)
    }

    pub fn count(filter: &FechaFilter, conn: &db::Conn) -> Result<i64, ServiceError> {
        let mut query = fechas::table
            .select(diesel::dsl::count_star())
            .into_boxed::<Pg>();

        if let Some(activa) = filter.activa {
            query = query.filter(fechas::activa.eq(activa));
        }

        let total = query.first(conn)?;

        Ok(total)
    }

    pub fn find_by_id(id: i32, conn: &db::Conn) -> Result<Fecha, ServiceError> {
        let fecha = fechas::table.filter(fechas::id.eq(id)).first(conn)?;

        Ok(fecha)
    }

    pub fn count_active(conn: &db::Conn) -> Result<i64, ServiceError> {
        let count = fechas::table
            .filter(fechas::activa.eq(true))
            .count()
            .get_result(conn)?;

        Ok(count)
    }

    pub fn create(fecha: NuevaFecha, conn: &db::Conn) -> Result<Fecha, ServiceError> {
        let fecha = diesel::insert_into(fechas::table)
            .values(&fecha)
            .get_result(conn)?;

        Ok(fecha)
    }

    pub fn update(id: i32, changes: UpdateFecha, conn: &db::Conn) -> Result<Fecha, ServiceError> {
        let fecha = diesel::update(fechas::table.filter(fechas::id.eq(id)))
            .set((&changes, fechas::updated_at.eq(diesel::dsl::now)))
            .get_result(conn)?;

        Ok(fecha)
    }

    /// Hard delete, the foreign keys cascade to partidos and resultados
    pub fn delete_by_id(id: i32, conn: &db::Conn) -> Result<(), ServiceError> {
        let deleted = diesel::delete(fechas::table.filter(fechas::id.eq(id))).execute(conn)?;

        if deleted == 0 {
            return Err(ServiceError::NotFound);
        }

        Ok(())
    }

    /// the fecha with its partidos ordered by numero and each partido's
    /// resultados ordered by posicion
    pub fn with_partidos(self, conn: &db::Conn) -> Result<FechaResponse, ServiceError> {
        let partidos = Partido::find_by_fecha(self.id, conn)?
            .into_iter()
            .map(|partido| partido.with_resultados(conn))
            .collect::<Result<Vec<PartidoResponse>, ServiceError>>()?;

        Ok(FechaResponse {
            fecha: self,
            partidos: Some(partidos),
        })
    }
}

impl UpdateFecha {
    pub fn validate(&self) -> Result<(), ServiceError> {
        if self.fecha.is_none()
            && self.nombre.is_none()
            && self.descripcion.is_none()
            && self.activa.is_none()
        {
            bad_request!("No hay campos para actualizar");
        }

        Ok(())
    }
}

impl From<Fecha> for FechaResponse {
    fn from(fecha: Fecha) -> FechaResponse {
        FechaResponse {
            fecha,
            partidos: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_update_is_rejected() {
        let update: UpdateFecha = serde_json::from_str("{}").unwrap();

        assert!(update.validate().is_err());
    }

    #[test]
    fn date_only_update_is_enough() {
        let update: UpdateFecha = serde_json::from_str(r#"{"fecha":"2025-02-01"}"#).unwrap();

        assert!(update.validate().is_ok());
        assert_eq!(
            update.fecha,
            Some(NaiveDate::from_ymd(2025, 2, 1))
        );
    }

    #[test]
    fn partidos_are_omitted_unless_requested() {
        let fecha = Fecha {
            id: 1,
            fecha: NaiveDate::from_ymd(2025, 2, 1),
            nombre: Some(String::from("Apertura")),
            descripcion: None,
            activa: true,
            created_at: None,
            updated_at: None,
        };

        let serialized = serde_json::to_value(FechaResponse::from(fecha)).unwrap();

        assert_eq!(serialized["nombre"], "Apertura");
        assert!(serialized.get("partidos").is_none());
    }
}
