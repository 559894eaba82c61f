use postgres::Client;

use crate::error::Result;

/// Ensure the observations table exists; safe to call on every run.
pub fn ensure_observations_table(client: &mut Client) -> Result<()> {
    client.batch_execute(
        "CREATE TABLE IF NOT EXISTS weather_observations (
            station_id VARCHAR(20),
            observation_date DATE,
            observation_type VARCHAR(10),
            value FLOAT,
            flag VARCHAR(1),
            time_of_observation VARCHAR(4),
            PRIMARY KEY (station_id, observation_date, observation_type)
        )",
    )?;
    Ok(())
}

/// Ensure the stations table exists; safe to call on every run.
pub fn ensure_stations_table(client: &mut Client) -> Result<()> {
    client.batch_execute(
        "CREATE TABLE IF NOT EXISTS weather_stations (
            station_id VARCHAR(11) PRIMARY KEY,
            latitude FLOAT,
            longitude FLOAT,
            elevation FLOAT,
            state VARCHAR(2),
            location_description VARCHAR(100),
            distance FLOAT,
            direction VARCHAR(3)
        )",
    )?;
    Ok(())
}
