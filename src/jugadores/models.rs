use chrono::{DateTime, Utc};
use diesel::pg::Pg;
use diesel::prelude::*;

use crate::db;
use crate::errors::ServiceError;
use crate::schema::jugadores;

#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Identifiable)]
#[table_name = "jugadores"]
pub struct Jugador {
    pub id: i32,
    pub nombre: String,
    pub edad: i32,
    pub equipo: String,
    pub imagen: Option<String>,
    pub ritmo: i32,
    pub pase: i32,
    pub regate: i32,
    pub defensa: i32,
    pub tiro: i32,
    pub reflejo: i32,
    pub activo: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Payload for creating a player, skill ratings default to 50
#[derive(Debug, Deserialize, Insertable)]
#[table_name = "jugadores"]
pub struct NuevoJugador {
    pub nombre: String,
    pub edad: i32,
    pub equipo: String,
    pub imagen: Option<String>,
    #[serde(default = "default_rating")]
    pub ritmo: i32,
    #[serde(default = "default_rating")]
    pub pase: i32,
    #[serde(default = "default_rating")]
    pub regate: i32,
    #[serde(default = "default_rating")]
    pub defensa: i32,
    #[serde(default = "default_rating")]
    pub tiro: i32,
    #[serde(default = "default_rating")]
    pub reflejo: i32,
}

fn default_rating() -> i32 {
    50
}

/// Partial update, absent fields keep their stored value
#[derive(Debug, Deserialize, AsChangeset)]
#[table_name = "jugadores"]
pub struct UpdateJugador {
    pub nombre: Option<String>,
    pub edad: Option<i32>,
    pub equipo: Option<String>,
    pub imagen: Option<String>,
    pub ritmo: Option<i32>,
    pub pase: Option<i32>,
    pub regate: Option<i32>,
    pub defensa: Option<i32>,
    pub tiro: Option<i32>,
    pub reflejo: Option<i32>,
    pub activo: Option<bool>,
}

/// JugadorFilter is the struct the client can use to query for players
#[derive(Debug, Deserialize)]
pub struct JugadorFilter {
    /// filter on the soft-delete flag
    pub activo: Option<bool>,
    /// matches %search% against nombre and equipo
    pub search: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl JugadorFilter {
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(10).max(1).min(100)
    }
}

impl Jugador {
    pub fn find_all(
        filter: &JugadorFilter,
        conn: &db::Conn,
    ) -> Result<Vec<Jugador>, ServiceError> {
        let mut query = jugadores::table.into_boxed::<Pg>();

        if let Some(activo) = filter.activo {
            query = query.filter(jugadores::activo.eq(activo));
        }

        if let Some(search) = &filter.search {
            let pattern = format!("%{}%", search);
            query = query.filter(
                jugadores::nombre
                    .ilike(pattern.clone())
                    .or(jugadores::equipo.ilike(pattern)),
            );
        }

        let jugadores = query
            .order(jugadores::nombre.asc())
            .limit(filter.limit())
            .offset((filter.page() - 1) * filter.limit())
            .load(conn)?;

        Ok(jugadores)
    }

    pub fn count(filter: &JugadorFilter, conn: &db::Conn) -> Result<i64, ServiceError> {
        let mut query = jugadores::table
            .select(diesel::dsl::count_star())
            .into_boxed::<Pg>();

        if let Some(activo) = filter.activo {
            query = query.filter(jugadores::activo.eq(activo));
        }

        if let Some(search) = &filter.search {
            let pattern = format!("%{}%", search);
            query = query.filter(
                jugadores::nombre
                    .ilike(pattern.clone())
                    .or(jugadores::equipo.ilike(pattern)),
            );
        }

        let total = query.first(conn)?;

        Ok(total)
    }

    pub fn find_by_id(id: i32, conn: &db::Conn) -> Result<Jugador, ServiceError> {
        let jugador = jugadores::table.filter(jugadores::id.eq(id)).first(conn)?;

        Ok(jugador)
    }

    /// all players that have not been soft-deleted
    pub fn find_active(conn: &db::Conn) -> Result<Vec<Jugador>, ServiceError> {
        let jugadores = jugadores::table
            .filter(jugadores::activo.eq(true))
            .order(jugadores::id.asc())
            .load(conn)?;

        Ok(jugadores)
    }

    pub fn count_active(conn: &db::Conn) -> Result<i64, ServiceError> {
        let count = jugadores::table
            .filter(jugadores::activo.eq(true))
            .count()
            .get_result(conn)?;

        Ok(count)
    }

    pub fn create(jugador: NuevoJugador, conn: &db::Conn) -> Result<Jugador, ServiceError> {
        let jugador = diesel::insert_into(jugadores::table)
            .values(&jugador)
            .get_result(conn)?;

        Ok(jugador)
    }

    pub fn update(
        id: i32,
        changes: UpdateJugador,
        conn: &db::Conn,
    ) -> Result<Jugador, ServiceError> {
        let jugador = diesel::update(jugadores::table.filter(jugadores::id.eq(id)))
            .set((&changes, jugadores::updated_at.eq(diesel::dsl::now)))
            .get_result(conn)?;

        Ok(jugador)
    }

    /// Soft delete: the row stays so historical resultados keep pointing
    /// at it, the player just stops showing up in active listings.
    pub fn soft_delete(id: i32, conn: &db::Conn) -> Result<(), ServiceError> {
        let deleted = diesel::update(jugadores::table.filter(jugadores::id.eq(id)))
            .set((
                jugadores::activo.eq(false),
                jugadores::updated_at.eq(diesel::dsl::now),
            ))
            .execute(conn)?;

        if deleted == 0 {
            return Err(ServiceError::NotFound);
        }

        Ok(())
    }
}

impl NuevoJugador {
    pub fn validate(&self) -> Result<(), ServiceError> {
        if self.nombre.trim().is_empty() || self.equipo.trim().is_empty() {
            bad_request!("Nombre, edad y equipo son requeridos");
        }

        if !(1..=99).contains(&self.edad) {
            bad_request!("La edad debe estar entre 1 y 99");
        }

        for rating in &[
            self.ritmo,
            self.pase,
            self.regate,
            self.defensa,
            self.tiro,
            self.reflejo,
        ] {
            if !(0..=100).contains(rating) {
                bad_request!("Las valoraciones deben estar entre 0 y 100");
            }
        }

        Ok(())
    }
}

impl UpdateJugador {
    pub fn validate(&self) -> Result<(), ServiceError> {
        if self.is_empty() {
            bad_request!("No hay campos para actualizar");
        }

        if let Some(nombre) = &self.nombre {
            if nombre.trim().is_empty() {
                bad_request!("El nombre no puede estar vacío");
            }
        }

        if let Some(equipo) = &self.equipo {
            if equipo.trim().is_empty() {
                bad_request!("El equipo no puede estar vacío");
            }
        }

        if let Some(edad) = self.edad {
            if !(1..=99).contains(&edad) {
                bad_request!("La edad debe estar entre 1 y 99");
            }
        }

        for rating in &[
            self.ritmo,
            self.pase,
            self.regate,
            self.defensa,
            self.tiro,
            self.reflejo,
        ] {
            if let Some(rating) = rating {
                if !(0..=100).contains(rating) {
                    bad_request!("Las valoraciones deben estar entre 0 y 100");
                }
            }
        }

        Ok(())
    }

    fn is_empty(&self) -> bool {
        self.nombre.is_none()
            && self.edad.is_none()
            && self.equipo.is_none()
            && self.imagen.is_none()
            && self.ritmo.is_none()
            && self.pase.is_none()
            && self.regate.is_none()
            && self.defensa.is_none()
            && self.tiro.is_none()
            && self.reflejo.is_none()
            && self.activo.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratings_default_to_50() {
        let jugador: NuevoJugador =
            serde_json::from_str(r#"{"nombre":"Ana","edad":24,"equipo":"Rojos"}"#).unwrap();

        assert_eq!(jugador.ritmo, 50);
        assert_eq!(jugador.pase, 50);
        assert_eq!(jugador.regate, 50);
        assert_eq!(jugador.defensa, 50);
        assert_eq!(jugador.tiro, 50);
        assert_eq!(jugador.reflejo, 50);
        assert!(jugador.validate().is_ok());
    }

    #[test]
    fn explicit_ratings_are_kept() {
        let jugador: NuevoJugador =
            serde_json::from_str(r#"{"nombre":"Ana","edad":24,"equipo":"Rojos","tiro":93}"#)
                .unwrap();

        assert_eq!(jugador.tiro, 93);
        assert_eq!(jugador.ritmo, 50);
    }

    #[test]
    fn rejects_blank_names_and_silly_ages() {
        let jugador: NuevoJugador =
            serde_json::from_str(r#"{"nombre":"  ","edad":24,"equipo":"Rojos"}"#).unwrap();
        assert!(jugador.validate().is_err());

        let jugador: NuevoJugador =
            serde_json::from_str(r#"{"nombre":"Ana","edad":0,"equipo":"Rojos"}"#).unwrap();
        assert!(jugador.validate().is_err());

        let jugador: NuevoJugador =
            serde_json::from_str(r#"{"nombre":"Ana","edad":24,"equipo":"Rojos","pase":101}"#)
                .unwrap();
        assert!(jugador.validate().is_err());
    }

    #[test]
    fn empty_update_is_rejected() {
        let update: UpdateJugador = serde_json::from_str("{}").unwrap();

        assert!(matches!(
            update.validate(),
            Err(ServiceError::BadRequest(_))
        ));
    }

    #[test]
    fn partial_update_passes_validation() {
        let update: UpdateJugador = serde_json::from_str(r#"{"equipo":"Azules"}"#).unwrap();

        assert!(update.validate().is_ok());
    }

    #[test]
    fn page_and_limit_are_clamped() {
        let filter = JugadorFilter {
            activo: None,
            search: None,
            page: Some(-3),
            limit: Some(10_000),
        };

        assert_eq!(filter.page(), 1);
        assert_eq!(filter.limit(), 100);
    }
}
