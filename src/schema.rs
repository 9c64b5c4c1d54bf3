table! {
    usuarios (id) {
        id -> Int4,
        username -> Varchar,
        password -> Varchar,
        role -> Varchar,
        activo -> Bool,
        ultimo_login -> Nullable<Timestamptz>,
        created_at -> Nullable<Timestamptz>,
        updated_at -> Nullable<Timestamptz>,
    }
}

table! {
    jugadores (id) {
        id -> Int4,
        nombre -> Varchar,
        edad -> Int4,
        equipo -> Varchar,
        imagen -> Nullable<Text>,
        ritmo -> Int4,
        pase -> Int4,
        regate -> Int4,
        defensa -> Int4,
        tiro -> Int4,
        reflejo -> Int4,
        activo -> Bool,
        created_at -> Nullable<Timestamptz>,
        updated_at -> Nullable<Timestamptz>,
    }
}

table! {
    fechas (id) {
        id -> Int4,
        fecha -> Date,
        nombre -> Nullable<Varchar>,
        descripcion -> Nullable<Text>,
        activa -> Bool,
        created_at -> Nullable<Timestamptz>,
        updated_at -> Nullable<Timestamptz>,
    }
}

table! {
    partidos (id) {
        id -> Int4,
        fecha_id -> Int4,
        numero -> Int4,
        completado -> Bool,
        created_at -> Nullable<Timestamptz>,
        updated_at -> Nullable<Timestamptz>,
    }
}

table! {
    resultados_partidos (id) {
        id -> Int4,
        partido_id -> Int4,
        jugador_id -> Int4,
        goles -> Int4,
        puntos -> Int4,
        posicion -> Int4,
        created_at -> Nullable<Timestamptz>,
        updated_at -> Nullable<Timestamptz>,
    }
}

joinable!(partidos -> fechas (fecha_id));
joinable!(resultados_partidos -> partidos (partido_id));
joinable!(resultados_partidos -> jugadores (jugador_id));

allow_tables_to_appear_in_same_query!(
    usuarios,
    jugadores,
    fechas,
    partidos,
    resultados_partidos,
);
