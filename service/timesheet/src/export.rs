use chrono::SecondsFormat;
use domain_timesheet::model::{entity::Timesheet, vo::hour_totals::seconds_to_hours};
use serde::Serialize;

#[derive(Serialize)]
struct ExportRow<'a> {
    employee: &'a str,
    role_code: &'a str,
    entry_number: Option<u8>,
    clock_in: String,
    clock_out: String,
    hours: String,
}

/// Renders the frozen totals, one row per closed entry followed by a total row.
pub fn render_csv(timesheet: &Timesheet) -> anyhow::Result<String> {
    let mut writer = csv::WriterBuilder::new().from_writer(vec![]);
    for worker in timesheet.hour_totals.workers.iter() {
        for entry in worker.entries.iter() {
            writer.serialize(ExportRow {
                employee: &worker.employee_name,
                role_code: &worker.role_code,
                entry_number: Some(entry.entry_number),
                clock_in: entry.clock_in.to_rfc3339_opts(SecondsFormat::Secs, true),
                clock_out: entry.clock_out.to_rfc3339_opts(SecondsFormat::Secs, true),
                hours: format_hours(entry.worked_seconds),
            })?;
        }
    }
    writer.serialize(ExportRow {
        employee: "TOTAL",
        role_code: "",
        entry_number: None,
        clock_in: String::new(),
        clock_out: String::new(),
        hours: format_hours(timesheet.hour_totals.total_seconds),
    })?;
    let bytes = writer.into_inner().map_err(|e| anyhow::anyhow!("{e}"))?;
    Ok(String::from_utf8(bytes)?)
}

fn format_hours(seconds: i64) -> String {
    format!("{:.2}", seconds_to_hours(seconds))
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use domain_timesheet::model::vo::{FrozenEntry, HourTotals, WorkerHours};
    use uuid::Uuid;

    use super::*;

    #[test]
    fn test_render_csv() {
        let at = |h| Utc.with_ymd_and_hms(2024, 7, 3, h, 0, 0).unwrap();
        let totals = HourTotals {
            total_seconds: 7 * 3600,
            workers: vec![WorkerHours {
                assignment_id: Uuid::new_v4(),
                employee_id: Uuid::new_v4(),
                employee_name: "Dana Reyes".to_string(),
                role_code: "GL".to_string(),
                entries: vec![
                    FrozenEntry {
                        entry_number: 1,
                        clock_in: at(9),
                        clock_out: at(12),
                        worked_seconds: 3 * 3600,
                    },
                    FrozenEntry {
                        entry_number: 2,
                        clock_in: at(13),
                        clock_out: at(17),
                        worked_seconds: 4 * 3600,
                    },
                ],
                worked_seconds: 7 * 3600,
            }],
        };
        let timesheet = Timesheet::finalize(Uuid::new_v4(), Uuid::new_v4(), totals, at(17));

        let csv = render_csv(&timesheet).unwrap();
        let lines = csv.lines().collect::<Vec<_>>();
        assert_eq!(
            lines,
            vec![
                "employee,role_code,entry_number,clock_in,clock_out,hours",
                "Dana Reyes,GL,1,2024-07-03T09:00:00Z,2024-07-03T12:00:00Z,3.00",
                "Dana Reyes,GL,2,2024-07-03T13:00:00Z,2024-07-03T17:00:00Z,4.00",
                "TOTAL,,,,,7.00",
            ]
        );
    }
}
