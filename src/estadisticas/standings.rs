use std::collections::{BTreeMap, HashSet};

use crate::estadisticas::models::{EstadisticasGenerales, ResultadoRow};
use crate::jugadores::Jugador;

#[derive(Default)]
struct Acumulado {
    partidos: i64,
    goles: i64,
    puntos: i64,
    primeros: i64,
    segundos: i64,
    terceros: i64,
    fechas: HashSet<i32>,
}

/// Fold resultado rows into the ranked league table.
///
/// Every player passed in appears in the output, players without a
/// single resultado end up at the bottom with all aggregates at zero.
/// Ordering is puntos desc, goles desc, then jugador id asc so repeated
/// calls over the same data always produce the same table.
pub fn generales(jugadores: Vec<Jugador>, rows: &[ResultadoRow]) -> Vec<EstadisticasGenerales> {
    let mut acumulados: BTreeMap<i32, Acumulado> = jugadores
        .iter()
        .map(|jugador| (jugador.id, Acumulado::default()))
        .collect();

    for row in rows {
        // rows of players outside the given set (soft-deleted ones) are skipped
        let acumulado = match acumulados.get_mut(&row.jugador_id) {
            Some(acumulado) => acumulado,
            None => continue,
        };

        acumulado.partidos += 1;
        acumulado.goles += i64::from(row.goles);
        acumulado.puntos += i64::from(row.puntos);
        acumulado.fechas.insert(row.fecha_id);

        match row.posicion {
            1 => acumulado.primeros += 1,
            2 => acumulado.segundos += 1,
            3 => acumulado.terceros += 1,
            _ => {}
        }
    }

    let mut tabla: Vec<EstadisticasGenerales> = jugadores
        .into_iter()
        .map(|jugador| {
            let acumulado = &acumulados[&jugador.id];

            EstadisticasGenerales {
                jugador_id: jugador.id,
                partidos_jugados: acumulado.partidos,
                goles_totales: acumulado.goles,
                puntos_totales: acumulado.puntos,
                primeros_puestos: acumulado.primeros,
                segundos_puestos: acumulado.segundos,
                terceros_puestos: acumulado.terceros,
                fechas_jugadas: acumulado.fechas.len() as i64,
                promedio_goles: promedio(acumulado.goles, acumulado.partidos),
                promedio_puntos: promedio(acumulado.puntos, acumulado.partidos),
                jugador,
            }
        })
        .collect();

    tabla.sort_by(|a, b| {
        b.puntos_totales
            .cmp(&a.puntos_totales)
            .then(b.goles_totales.cmp(&a.goles_totales))
            .then(a.jugador_id.cmp(&b.jugador_id))
    });

    tabla
}

/// average per played match, rounded to 2 decimal places
fn promedio(total: i64, partidos: i64) -> f64 {
    if partidos == 0 {
        return 0.0;
    }

    round2(total as f64 / partidos as f64)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// The player with the most goals. Ties break toward the lowest jugador
/// id, players without any resultado never win a superlative.
pub fn jugador_mas_goles(tabla: &[EstadisticasGenerales]) -> Option<&EstadisticasGenerales> {
    superlativo(tabla, |e| e.goles_totales)
}

/// The player with the most points, same tie-break as [`jugador_mas_goles`]
pub fn jugador_mas_puntos(tabla: &[EstadisticasGenerales]) -> Option<&EstadisticasGenerales> {
    superlativo(tabla, |e| e.puntos_totales)
}

fn superlativo<F>(tabla: &[EstadisticasGenerales], total: F) -> Option<&EstadisticasGenerales>
where
    F: Fn(&EstadisticasGenerales) -> i64,
{
    tabla
        .iter()
        .filter(|e| e.partidos_jugados > 0)
        .max_by_key(|e| (total(e), std::cmp::Reverse(e.jugador_id)))
}

/// The partido with the highest combined goal count, as
/// (partido_id, total goles). Ties break toward the lowest partido id.
pub fn partido_mas_goles(rows: &[ResultadoRow]) -> Option<(i32, i64)> {
    let mut totales: BTreeMap<i32, i64> = BTreeMap::new();

    for row in rows {
        *totales.entry(row.partido_id).or_insert(0) += i64::from(row.goles);
    }

    totales
        .into_iter()
        .max_by_key(|(partido_id, goles)| (*goles, std::cmp::Reverse(*partido_id)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jugador(id: i32, nombre: &str) -> Jugador {
        Jugador {
            id,
            nombre: nombre.to_string(),
            edad: 25,
            equipo: String::from("Rojos"),
            imagen: None,
            ritmo: 50,
            pase: 50,
            regate: 50,
            defensa: 50,
            tiro: 50,
            reflejo: 50,
            activo: true,
            created_at: None,
            updated_at: None,
        }
    }

    fn row(jugador_id: i32, partido_id: i32, fecha_id: i32, goles: i32, puntos: i32, posicion: i32) -> ResultadoRow {
        ResultadoRow {
            jugador_id,
            partido_id,
            fecha_id,
            goles,
            puntos,
            posicion,
        }
    }

    #[test]
    fn aggregates_per_player() {
        let jugadores = vec![jugador(1, "Ana"), jugador(2, "Beto")];
        let rows = vec![
            row(1, 1, 1, 3, 3, 1),
            row(1, 2, 1, 1, 2, 2),
            row(1, 3, 2, 2, 3, 1),
            row(2, 1, 1, 0, 1, 3),
        ];

        let tabla = generales(jugadores, &rows);

        let ana = &tabla[0];
        assert_eq!(ana.jugador.nombre, "Ana");
        assert_eq!(ana.partidos_jugados, 3);
        assert_eq!(ana.goles_totales, 6);
        assert_eq!(ana.puntos_totales, 8);
        assert_eq!(ana.primeros_puestos, 2);
        assert_eq!(ana.segundos_puestos, 1);
        assert_eq!(ana.terceros_puestos, 0);
        assert_eq!(ana.fechas_jugadas, 2);
        assert_eq!(ana.promedio_goles, 2.0);
        assert_eq!(ana.promedio_puntos, 2.67);

        let beto = &tabla[1];
        assert_eq!(beto.terceros_puestos, 1);
        assert_eq!(beto.fechas_jugadas, 1);
    }

    #[test]
    fn players_without_resultados_still_appear() {
        let jugadores = vec![jugador(1, "Ana"), jugador(2, "Beto"), jugador(3, "Cris")];
        let rows = vec![row(2, 1, 1, 1, 2, 1)];

        let tabla = generales(jugadores, &rows);

        assert_eq!(tabla.len(), 3);
        assert_eq!(tabla[0].jugador.nombre, "Beto");

        // zero players at the bottom, ordered by id
        assert_eq!(tabla[1].jugador_id, 1);
        assert_eq!(tabla[2].jugador_id, 3);
        assert_eq!(tabla[1].partidos_jugados, 0);
        assert_eq!(tabla[1].puntos_totales, 0);
        assert_eq!(tabla[1].promedio_goles, 0.0);
    }

    #[test]
    fn rows_of_unknown_players_are_ignored() {
        let jugadores = vec![jugador(1, "Ana")];
        let rows = vec![row(99, 1, 1, 5, 3, 1)];

        let tabla = generales(jugadores, &rows);

        assert_eq!(tabla.len(), 1);
        assert_eq!(tabla[0].goles_totales, 0);
    }

    #[test]
    fn ordering_is_points_then_goals_then_id() {
        let jugadores = vec![jugador(1, "Ana"), jugador(2, "Beto"), jugador(3, "Cris")];
        let rows = vec![
            // Ana: 3 puntos, 1 gol
            row(1, 1, 1, 1, 3, 1),
            // Beto: 3 puntos, 4 goles
            row(2, 2, 1, 4, 3, 1),
            // Cris: 5 puntos
            row(3, 3, 1, 0, 5, 1),
        ];

        let tabla = generales(jugadores, &rows);

        let orden: Vec<i32> = tabla.iter().map(|e| e.jugador_id).collect();
        assert_eq!(orden, vec![3, 2, 1]);

        for pair in tabla.windows(2) {
            assert!(
                pair[0].puntos_totales > pair[1].puntos_totales
                    || (pair[0].puntos_totales == pair[1].puntos_totales
                        && pair[0].goles_totales >= pair[1].goles_totales)
            );
        }
    }

    #[test]
    fn full_ties_break_on_the_lower_id() {
        let jugadores = vec![jugador(7, "Gema"), jugador(2, "Beto")];
        let rows = vec![row(7, 1, 1, 2, 3, 1), row(2, 2, 1, 2, 3, 1)];

        let tabla = generales(jugadores, &rows);

        assert_eq!(tabla[0].jugador_id, 2);
        assert_eq!(tabla[1].jugador_id, 7);
    }

    #[test]
    fn repeated_runs_are_identical() {
        let jugadores = vec![jugador(1, "Ana"), jugador(2, "Beto"), jugador(3, "Cris")];
        let rows = vec![
            row(1, 1, 1, 2, 2, 2),
            row(2, 1, 1, 2, 2, 1),
            row(3, 2, 2, 0, 0, 4),
        ];

        let primera: Vec<i32> = generales(jugadores.clone(), &rows)
            .iter()
            .map(|e| e.jugador_id)
            .collect();
        let segunda: Vec<i32> = generales(jugadores, &rows)
            .iter()
            .map(|e| e.jugador_id)
            .collect();

        assert_eq!(primera, segunda);
    }

    #[test]
    fn averages_round_to_two_decimals() {
        assert_eq!(promedio(1, 3), 0.33);
        assert_eq!(promedio(2, 3), 0.67);
        assert_eq!(promedio(0, 0), 0.0);
        assert_eq!(promedio(7, 2), 3.5);
    }

    #[test]
    fn superlatives_on_an_empty_league() {
        let tabla = generales(vec![jugador(1, "Ana")], &[]);

        assert!(jugador_mas_goles(&tabla).is_none());
        assert!(jugador_mas_puntos(&tabla).is_none());
        assert!(partido_mas_goles(&[]).is_none());
    }

    #[test]
    fn superlative_ties_take_the_lowest_id() {
        let jugadores = vec![jugador(5, "Eli"), jugador(3, "Cris")];
        let rows = vec![row(5, 1, 1, 4, 1, 2), row(3, 2, 1, 4, 2, 1)];

        let tabla = generales(jugadores, &rows);

        assert_eq!(jugador_mas_goles(&tabla).unwrap().jugador_id, 3);
        assert_eq!(jugador_mas_puntos(&tabla).unwrap().jugador_id, 3);
    }

    #[test]
    fn most_goals_in_a_single_partido() {
        let rows = vec![
            row(1, 1, 1, 2, 3, 1),
            row(2, 1, 1, 2, 2, 2),
            row(1, 2, 1, 3, 3, 1),
        ];

        assert_eq!(partido_mas_goles(&rows), Some((1, 4)));
    }

    #[test]
    fn partido_goal_ties_take_the_lowest_id() {
        let rows = vec![row(1, 4, 1, 3, 3, 1), row(2, 2, 1, 3, 3, 1)];

        assert_eq!(partido_mas_goles(&rows), Some((2, 3)));
    }
}
