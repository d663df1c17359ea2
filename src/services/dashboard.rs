//! Dashboard aggregation. Everything here is a pure function over rows the
//! handlers already loaded, so the numbers can be checked without a database.

use std::collections::BTreeMap;
use std::fmt::Debug;

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use sea_orm::ActiveEnum;
use serde::{Deserialize, Serialize};

use crate::entities::enums::MaintenanceStatus;
use crate::entities::{
    daily_record, equipment, garden, garden_care_activity, journal_entry, plant,
    plant_care_activity,
};

const RECENT_ITEMS: usize = 5;
const RECENT_ACTIVITIES: usize = 10;
const AVERAGE_WINDOW_DAYS: i64 = 30;

/// `?month=&year=` on the dashboard routes. Missing or out-of-range values fall
/// back to the current month.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct MonthQuery {
    pub month: Option<u32>,
    pub year: Option<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthSelection {
    pub month: u32,
    pub year: i32,
}

impl MonthSelection {
    pub fn resolve(query: MonthQuery, now: DateTime<Utc>) -> Self {
        let month = query
            .month
            .filter(|m| (1..=12).contains(m))
            .unwrap_or_else(|| now.month());
        Self {
            month,
            year: query.year.unwrap_or_else(|| now.year()),
        }
    }

    pub fn contains(&self, at: &DateTime<Utc>) -> bool {
        at.month() == self.month && at.year() == self.year
    }

    fn option(self) -> MonthOption {
        let display_text = NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .map(|d| d.format("%B %Y").to_string())
            .unwrap_or_else(|| format!("{}/{}", self.month, self.year));
        MonthOption {
            month: self.month,
            year: self.year,
            display_text,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthOption {
    pub month: u32,
    pub year: i32,
    pub display_text: String,
}

/// Distinct months that have data, newest first. When nothing has been logged
/// yet the selected month is offered on its own.
pub fn available_months(
    dates: impl IntoIterator<Item = DateTime<Utc>>,
    selected: MonthSelection,
) -> Vec<MonthOption> {
    let mut months: Vec<(i32, u32)> = dates.into_iter().map(|d| (d.year(), d.month())).collect();
    months.sort_unstable_by(|a, b| b.cmp(a));
    months.dedup();

    if months.is_empty() {
        return vec![selected.option()];
    }
    months
        .into_iter()
        .map(|(year, month)| MonthSelection { month, year }.option())
        .collect()
}

pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn chart_label(at: &DateTime<Utc>) -> String {
    at.format("%b %d").to_string()
}

fn type_label<T: Debug>(value: &T) -> String {
    format!("{value:?}")
}

fn newest<T: Clone>(items: &[T], at: impl Fn(&T) -> DateTime<Utc>, take: usize) -> Vec<T> {
    let mut sorted = items.to_vec();
    sorted.sort_by_key(|item| std::cmp::Reverse(at(item)));
    sorted.truncate(take);
    sorted
}

fn in_month<T: Clone>(
    items: &[T],
    at: impl Fn(&T) -> DateTime<Utc>,
    selected: MonthSelection,
) -> Vec<T> {
    let mut monthly: Vec<T> = items
        .iter()
        .filter(|item| selected.contains(&at(item)))
        .cloned()
        .collect();
    monthly.sort_by_key(|item| std::cmp::Reverse(at(item)));
    monthly
}

fn counts_by<T, K: Debug>(items: &[T], key: impl Fn(&T) -> K) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for item in items {
        *counts.entry(type_label(&key(item))).or_insert(0) += 1;
    }
    counts
}

/// Labels and counts, busiest first. Ties keep alphabetical order.
fn ranked_counts<T, K: Debug>(items: &[T], key: impl Fn(&T) -> K) -> (Vec<String>, Vec<usize>) {
    let mut ranked: Vec<(String, usize)> = counts_by(items, key).into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.into_iter().unzip()
}

fn per_day<T>(items: &[T], at: impl Fn(&T) -> DateTime<Utc>) -> (Vec<String>, Vec<usize>) {
    let mut days: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for item in items {
        *days.entry(at(item).date_naive()).or_insert(0) += 1;
    }
    days.into_iter()
        .map(|(day, count)| (day.format("%b %d").to_string(), count))
        .unzip()
}

#[derive(Debug, Clone, Serialize)]
pub struct TimelineDay<T> {
    pub date: NaiveDate,
    pub activities: Vec<T>,
}

/// Groups by calendar day, newest day first. Expects `items` newest first.
fn timeline<T: Clone>(items: &[T], at: impl Fn(&T) -> DateTime<Utc>) -> Vec<TimelineDay<T>> {
    let mut days: BTreeMap<NaiveDate, Vec<T>> = BTreeMap::new();
    for item in items {
        days.entry(at(item).date_naive()).or_default().push(item.clone());
    }
    days.into_iter()
        .rev()
        .map(|(date, activities)| TimelineDay { date, activities })
        .collect()
}

fn by_status(equipment: &[equipment::Model], status: MaintenanceStatus) -> Vec<equipment::Model> {
    equipment
        .iter()
        .filter(|e| e.maintenance_status == status)
        .cloned()
        .collect()
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, n) = values.fold((0.0, 0u32), |(sum, n), v| (sum + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}

/// Everything a user owns, as loaded for the landing dashboard.
#[derive(Debug, Default)]
pub struct HomeData {
    pub gardens: Vec<garden::Model>,
    pub plants: Vec<plant::Model>,
    pub equipment: Vec<equipment::Model>,
    pub daily_records: Vec<daily_record::Model>,
    pub journal_entries: Vec<journal_entry::Model>,
}

#[derive(Debug, Serialize)]
pub struct HomeDashboard {
    pub total_gardens: usize,
    pub total_plants: usize,
    pub total_equipment: usize,
    pub total_daily_records: usize,
    pub total_journal_entries: usize,
    pub recent_gardens: Vec<garden::Model>,
    pub recent_plants: Vec<plant::Model>,
    pub recent_daily_records: Vec<daily_record::Model>,
    pub recent_journal_entries: Vec<journal_entry::Model>,
    pub recent_equipment: Vec<equipment::Model>,
    pub all_gardens: Vec<garden::Model>,
    pub plants_by_type: BTreeMap<String, usize>,
    pub equipment_by_type: BTreeMap<String, usize>,
    pub gardens_by_type: BTreeMap<String, usize>,
    pub avg_inside_temperature: Option<f64>,
    pub avg_outside_temperature: Option<f64>,
    pub avg_inside_humidity: Option<f64>,
    pub avg_outside_humidity: Option<f64>,
    pub equipment_under_maintenance: Vec<equipment::Model>,
    pub equipment_maintenance_requested: Vec<equipment::Model>,
    pub operational_equipment_count: usize,
}

pub fn home_dashboard(data: HomeData, now: DateTime<Utc>) -> HomeDashboard {
    let since = now - Duration::days(AVERAGE_WINDOW_DAYS);
    let window: Vec<&daily_record::Model> = data
        .daily_records
        .iter()
        .filter(|r| r.created_date >= since)
        .collect();
    let average = |field: fn(&daily_record::Model) -> f64| {
        mean(window.iter().map(|r| field(r))).map(round1)
    };

    let mut all_gardens = data.gardens.clone();
    all_gardens.sort_by(|a, b| a.name.cmp(&b.name));

    HomeDashboard {
        total_gardens: data.gardens.len(),
        total_plants: data.plants.len(),
        total_equipment: data.equipment.len(),
        total_daily_records: data.daily_records.len(),
        total_journal_entries: data.journal_entries.len(),
        recent_gardens: newest(&data.gardens, |g| g.start_date, RECENT_ITEMS),
        recent_plants: newest(&data.plants, |p| p.date_planted, RECENT_ITEMS),
        recent_daily_records: newest(&data.daily_records, |r| r.created_date, RECENT_ITEMS),
        recent_journal_entries: newest(&data.journal_entries, |e| e.entry_date, RECENT_ITEMS),
        recent_equipment: newest(&data.equipment, |e| e.purchase_date, RECENT_ITEMS),
        all_gardens,
        plants_by_type: counts_by(&data.plants, |p| p.plant_type),
        equipment_by_type: counts_by(&data.equipment, |e| e.equipment_type),
        gardens_by_type: counts_by(&data.gardens, |g| g.garden_type),
        avg_inside_temperature: average(|r| r.inside_temperature),
        avg_outside_temperature: average(|r| r.outside_temperature),
        avg_inside_humidity: average(|r| r.inside_humidity),
        avg_outside_humidity: average(|r| r.outside_humidity),
        equipment_under_maintenance: by_status(&data.equipment, MaintenanceStatus::UnderMaintenance),
        equipment_maintenance_requested: by_status(
            &data.equipment,
            MaintenanceStatus::MaintenanceRequested,
        ),
        operational_equipment_count: data
            .equipment
            .iter()
            .filter(|e| e.maintenance_status == MaintenanceStatus::Operational)
            .count(),
    }
}

#[derive(Debug, Serialize)]
pub struct GardenDashboard {
    pub garden: garden::Model,
    pub most_recent_record: Option<daily_record::Model>,
    pub chart_labels: Vec<String>,
    pub inside_temperature: Vec<f64>,
    pub outside_temperature: Vec<f64>,
    pub inside_humidity: Vec<f64>,
    pub outside_humidity: Vec<f64>,
    pub inside_vpd: Vec<f64>,
    pub outside_vpd: Vec<f64>,
    pub selected: MonthSelection,
    pub available_months: Vec<MonthOption>,
    pub equipment_under_maintenance: Vec<equipment::Model>,
    pub equipment_maintenance_requested: Vec<equipment::Model>,
    pub operational_equipment_count: usize,
}

pub fn garden_dashboard(
    garden: garden::Model,
    records: &[daily_record::Model],
    equipment: &[equipment::Model],
    selected: MonthSelection,
) -> GardenDashboard {
    let mut monthly = in_month(records, |r| r.created_date, selected);
    monthly.reverse();
    let series =
        |field: fn(&daily_record::Model) -> f64| -> Vec<f64> { monthly.iter().map(field).collect() };

    GardenDashboard {
        most_recent_record: records.iter().max_by_key(|r| r.created_date).cloned(),
        chart_labels: monthly.iter().map(|r| chart_label(&r.created_date)).collect(),
        inside_temperature: series(|r| r.inside_temperature),
        outside_temperature: series(|r| r.outside_temperature),
        inside_humidity: series(|r| r.inside_humidity),
        outside_humidity: series(|r| r.outside_humidity),
        inside_vpd: series(|r| r.inside_vpd),
        outside_vpd: series(|r| r.outside_vpd),
        selected,
        available_months: available_months(records.iter().map(|r| r.created_date), selected),
        equipment_under_maintenance: by_status(equipment, MaintenanceStatus::UnderMaintenance),
        equipment_maintenance_requested: by_status(
            equipment,
            MaintenanceStatus::MaintenanceRequested,
        ),
        operational_equipment_count: equipment
            .iter()
            .filter(|e| e.maintenance_status == MaintenanceStatus::Operational)
            .count(),
        garden,
    }
}

#[derive(Debug, Serialize)]
pub struct GardenCareDashboard {
    pub garden: garden::Model,
    pub selected: MonthSelection,
    pub available_months: Vec<MonthOption>,
    pub monthly_activities: Vec<garden_care_activity::Model>,
    pub recent_activities: Vec<garden_care_activity::Model>,
    pub most_recent_activity: Option<garden_care_activity::Model>,
    pub total_activities_count: usize,
    pub watering_sessions_count: usize,
    pub nutrient_applications_count: usize,
    pub new_plantings_count: usize,
    pub weeding_sessions_count: usize,
    pub pruning_sessions_count: usize,
    pub pest_control_sessions_count: usize,
    pub average_activity_duration: f64,
    pub total_water_added: f64,
    pub total_plants_added: i64,
    pub activity_type_labels: Vec<String>,
    pub activity_count_by_type: Vec<usize>,
    pub chart_labels: Vec<String>,
    pub water_usage_data: Vec<f64>,
    pub frequency_labels: Vec<String>,
    pub activity_frequency_data: Vec<usize>,
    pub activities_by_date: Vec<TimelineDay<garden_care_activity::Model>>,
}

pub fn garden_care_dashboard(
    garden: garden::Model,
    activities: &[garden_care_activity::Model],
    selected: MonthSelection,
) -> GardenCareDashboard {
    let monthly = in_month(activities, |a| a.activity_date, selected);
    let count = |flag: fn(&garden_care_activity::Model) -> bool| {
        monthly.iter().filter(|a| flag(a)).count()
    };

    let (activity_type_labels, activity_count_by_type) =
        ranked_counts(&monthly, |a| a.activity_type);

    let mut watered: Vec<&garden_care_activity::Model> = monthly
        .iter()
        .filter(|a| a.water_amount_added.is_some())
        .collect();
    watered.sort_by_key(|a| a.activity_date);

    let (frequency_labels, activity_frequency_data) = per_day(&monthly, |a| a.activity_date);

    GardenCareDashboard {
        selected,
        available_months: available_months(activities.iter().map(|a| a.activity_date), selected),
        recent_activities: monthly.iter().take(RECENT_ACTIVITIES).cloned().collect(),
        most_recent_activity: monthly.first().cloned(),
        total_activities_count: monthly.len(),
        watering_sessions_count: count(|a| a.watering_performed),
        nutrient_applications_count: count(|a| a.nutrients_added),
        new_plantings_count: count(|a| a.new_plantings_added),
        weeding_sessions_count: count(|a| a.weeding_performed),
        pruning_sessions_count: count(|a| a.pruning_performed),
        pest_control_sessions_count: count(|a| a.pest_control_performed),
        average_activity_duration: super::garden_care::mean_duration(
            monthly.iter().filter_map(|a| a.activity_duration),
        ),
        total_water_added: monthly.iter().filter_map(|a| a.water_amount_added).sum(),
        total_plants_added: monthly
            .iter()
            .filter_map(|a| a.number_of_plants_added)
            .map(i64::from)
            .sum(),
        activity_type_labels,
        activity_count_by_type,
        chart_labels: watered.iter().map(|a| chart_label(&a.activity_date)).collect(),
        water_usage_data: watered.iter().filter_map(|a| a.water_amount_added).collect(),
        frequency_labels,
        activity_frequency_data,
        activities_by_date: timeline(&monthly, |a| a.activity_date),
        monthly_activities: monthly,
        garden,
    }
}

#[derive(Debug, Serialize)]
pub struct PlantCareDashboard {
    pub plant: plant::Model,
    pub selected: MonthSelection,
    pub available_months: Vec<MonthOption>,
    pub monthly_activities: Vec<plant_care_activity::Model>,
    pub recent_activities: Vec<plant_care_activity::Model>,
    pub most_recent_activity: Option<plant_care_activity::Model>,
    pub total_activities_count: usize,
    pub watering_count: usize,
    pub fertilizing_count: usize,
    pub pruning_count: usize,
    pub pest_control_count: usize,
    pub average_activity_duration: f64,
    pub total_water_amount: f64,
    pub activity_type_labels: Vec<String>,
    pub activity_count_by_type: Vec<usize>,
    /// Health observations in date order, as the stored enum value (1 = Excellent).
    pub chart_labels: Vec<String>,
    pub health_status_data: Vec<i32>,
    pub frequency_labels: Vec<String>,
    pub activity_frequency_data: Vec<usize>,
    pub activities_by_date: Vec<TimelineDay<plant_care_activity::Model>>,
}

pub fn plant_care_dashboard(
    plant: plant::Model,
    activities: &[plant_care_activity::Model],
    selected: MonthSelection,
) -> PlantCareDashboard {
    let monthly = in_month(activities, |a| a.activity_date, selected);
    let count = |flag: fn(&plant_care_activity::Model) -> bool| {
        monthly.iter().filter(|a| flag(a)).count()
    };

    let (activity_type_labels, activity_count_by_type) =
        ranked_counts(&monthly, |a| a.activity_type);

    let mut observed: Vec<&plant_care_activity::Model> = monthly
        .iter()
        .filter(|a| a.plant_health_status.is_some())
        .collect();
    observed.sort_by_key(|a| a.activity_date);

    let (frequency_labels, activity_frequency_data) = per_day(&monthly, |a| a.activity_date);

    PlantCareDashboard {
        selected,
        available_months: available_months(activities.iter().map(|a| a.activity_date), selected),
        recent_activities: monthly.iter().take(RECENT_ACTIVITIES).cloned().collect(),
        most_recent_activity: monthly.first().cloned(),
        total_activities_count: monthly.len(),
        watering_count: count(|a| a.watering_performed),
        fertilizing_count: count(|a| a.fertilizer_applied),
        pruning_count: count(|a| a.pruning_performed),
        pest_control_count: count(|a| a.pest_control_performed),
        average_activity_duration: super::garden_care::mean_duration(
            monthly.iter().filter_map(|a| a.activity_duration),
        ),
        total_water_amount: monthly.iter().filter_map(|a| a.water_amount).sum(),
        activity_type_labels,
        activity_count_by_type,
        chart_labels: observed.iter().map(|a| chart_label(&a.activity_date)).collect(),
        health_status_data: observed
            .iter()
            .filter_map(|a| a.plant_health_status)
            .map(|s| s.to_value())
            .collect(),
        frequency_labels,
        activity_frequency_data,
        activities_by_date: timeline(&monthly, |a| a.activity_date),
        monthly_activities: monthly,
        plant,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::enums::{
        CareActivityType, PlantCareActivityType, PlantHealthStatus, PlantType,
    };
    use crate::services::{
        daily_records, equipment as equipment_service, garden_care, gardens, plant_care, plants,
    };
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    fn june_2024() -> MonthSelection {
        MonthSelection { month: 6, year: 2024 }
    }

    #[test]
    fn selection_falls_back_to_the_current_month() {
        let now = at(2024, 6, 15, 12);
        let sel = MonthSelection::resolve(MonthQuery::default(), now);
        assert_eq!(sel, june_2024());

        let bogus = MonthSelection::resolve(MonthQuery { month: Some(13), year: Some(2023) }, now);
        assert_eq!(bogus, MonthSelection { month: 6, year: 2023 });
    }

    #[test]
    fn available_months_are_distinct_and_newest_first() {
        let months = available_months(
            [at(2024, 5, 2, 0), at(2024, 6, 1, 0), at(2024, 5, 20, 0), at(2023, 12, 31, 0)],
            june_2024(),
        );
        let pairs: Vec<(i32, u32)> = months.iter().map(|m| (m.year, m.month)).collect();
        assert_eq!(pairs, vec![(2024, 6), (2024, 5), (2023, 12)]);
        assert_eq!(months[0].display_text, "June 2024");
    }

    #[test]
    fn empty_history_offers_the_selected_month() {
        let months = available_months(Vec::new(), MonthSelection { month: 2, year: 2025 });
        assert_eq!(months.len(), 1);
        assert_eq!(months[0].display_text, "February 2025");
    }

    #[test]
    fn rounds_to_one_decimal() {
        assert_eq!(round1(21.249), 21.2);
        assert_eq!(round1(21.25), 21.3);
    }

    #[test]
    fn home_dashboard_counts_and_averages_recent_records() {
        let now = at(2024, 6, 30, 12);
        let mut warm = daily_records::tests::sample(1, at(2024, 6, 20, 8));
        warm.inside_temperature = 25.0;
        let mut cool = daily_records::tests::sample(2, at(2024, 6, 21, 8));
        cool.inside_temperature = 22.5;
        let mut stale = daily_records::tests::sample(3, at(2024, 1, 1, 8));
        stale.inside_temperature = 5.0;

        let mut herb = plants::tests::sample(2, 1, 5);
        herb.plant_type = PlantType::Herb;
        let data = HomeData {
            gardens: vec![gardens::tests::sample(1, 5)],
            plants: vec![plants::tests::sample(1, 1, 5), herb, plants::tests::sample(3, 1, 5)],
            equipment: vec![
                equipment_service::tests::sample(1, MaintenanceStatus::Operational),
                equipment_service::tests::sample(2, MaintenanceStatus::UnderMaintenance),
                equipment_service::tests::sample(3, MaintenanceStatus::MaintenanceRequested),
            ],
            daily_records: vec![warm, cool, stale],
            journal_entries: Vec::new(),
        };

        let dash = home_dashboard(data, now);
        assert_eq!(dash.total_plants, 3);
        assert_eq!(dash.total_daily_records, 3);
        assert_eq!(dash.plants_by_type.get("Vegetable"), Some(&2));
        assert_eq!(dash.plants_by_type.get("Herb"), Some(&1));
        assert_eq!(dash.avg_inside_temperature, Some(23.8));
        assert_eq!(dash.avg_outside_humidity, Some(70.0));
        assert_eq!(dash.recent_daily_records[0].id, 2);
        assert_eq!(dash.operational_equipment_count, 1);
        assert_eq!(dash.equipment_under_maintenance[0].id, 2);
        assert_eq!(dash.equipment_maintenance_requested[0].id, 3);
        assert!(dash.recent_journal_entries.is_empty());
    }

    #[test]
    fn home_dashboard_has_no_averages_without_recent_records() {
        let dash = home_dashboard(HomeData::default(), at(2024, 6, 30, 12));
        assert_eq!(dash.avg_inside_temperature, None);
        assert_eq!(dash.total_gardens, 0);
    }

    #[test]
    fn garden_dashboard_charts_the_selected_month_in_date_order() {
        let mut late = daily_records::tests::sample(1, at(2024, 6, 12, 9));
        late.inside_temperature = 26.0;
        let mut early = daily_records::tests::sample(2, at(2024, 6, 3, 9));
        early.inside_temperature = 21.0;
        let july = daily_records::tests::sample(3, at(2024, 7, 1, 9));

        let dash = garden_dashboard(
            gardens::tests::sample(1, 5),
            &[late, early, july],
            &[equipment_service::tests::sample(1, MaintenanceStatus::Operational)],
            june_2024(),
        );
        assert_eq!(dash.chart_labels, vec!["Jun 03", "Jun 12"]);
        assert_eq!(dash.inside_temperature, vec![21.0, 26.0]);
        assert_eq!(dash.most_recent_record.map(|r| r.id), Some(3));
        assert_eq!(dash.available_months.len(), 2);
        assert_eq!(dash.operational_equipment_count, 1);
    }

    #[test]
    fn garden_care_dashboard_summarises_the_month() {
        let mut water_a = garden_care::tests::sample(1, at(2024, 6, 10, 8), CareActivityType::Watering);
        water_a.watering_performed = true;
        water_a.water_amount_added = Some(12.5);
        water_a.activity_duration = Some(20);
        let mut water_b = garden_care::tests::sample(2, at(2024, 6, 2, 8), CareActivityType::Watering);
        water_b.watering_performed = true;
        water_b.water_amount_added = Some(7.5);
        let mut planting =
            garden_care::tests::sample(3, at(2024, 6, 10, 17), CareActivityType::NewPlantings);
        planting.new_plantings_added = true;
        planting.number_of_plants_added = Some(6);
        planting.activity_duration = Some(40);
        let may = garden_care::tests::sample(4, at(2024, 5, 30, 8), CareActivityType::Weeding);

        let dash = garden_care_dashboard(
            gardens::tests::sample(1, 5),
            &[water_a, water_b, planting, may],
            june_2024(),
        );
        assert_eq!(dash.total_activities_count, 3);
        assert_eq!(dash.most_recent_activity.as_ref().map(|a| a.id), Some(3));
        assert_eq!(dash.watering_sessions_count, 2);
        assert_eq!(dash.new_plantings_count, 1);
        assert_eq!(dash.weeding_sessions_count, 0);
        assert_eq!(dash.average_activity_duration, 30.0);
        assert_eq!(dash.total_water_added, 20.0);
        assert_eq!(dash.total_plants_added, 6);
        assert_eq!(dash.activity_type_labels, vec!["Watering", "NewPlantings"]);
        assert_eq!(dash.activity_count_by_type, vec![2, 1]);
        assert_eq!(dash.chart_labels, vec!["Jun 02", "Jun 10"]);
        assert_eq!(dash.water_usage_data, vec![7.5, 12.5]);
        assert_eq!(dash.activity_frequency_data, vec![1, 2]);
        assert_eq!(dash.activities_by_date.len(), 2);
        assert_eq!(dash.activities_by_date[0].date, NaiveDate::from_ymd_opt(2024, 6, 10).unwrap());
        assert_eq!(dash.activities_by_date[0].activities.len(), 2);
    }

    #[test]
    fn empty_month_has_zero_duration() {
        let dash = garden_care_dashboard(gardens::tests::sample(1, 5), &[], june_2024());
        assert_eq!(dash.average_activity_duration, 0.0);
        assert!(dash.most_recent_activity.is_none());
        assert_eq!(dash.available_months[0].display_text, "June 2024");
    }

    #[test]
    fn plant_care_dashboard_tracks_health() {
        let mut first = plant_care::tests::sample(1, at(2024, 6, 1, 8), PlantCareActivityType::Watering);
        first.watering_performed = true;
        first.water_amount = Some(0.5);
        first.plant_health_status = Some(PlantHealthStatus::Fair);
        let mut second =
            plant_care::tests::sample(2, at(2024, 6, 8, 8), PlantCareActivityType::Fertilizing);
        second.fertilizer_applied = true;
        second.plant_health_status = Some(PlantHealthStatus::Good);

        let dash = plant_care_dashboard(plants::tests::sample(1, 1, 5), &[second, first], june_2024());
        assert_eq!(dash.watering_count, 1);
        assert_eq!(dash.fertilizing_count, 1);
        assert_eq!(dash.total_water_amount, 0.5);
        assert_eq!(dash.health_status_data, vec![3, 2]);
        assert_eq!(dash.chart_labels, vec!["Jun 01", "Jun 08"]);
    }
}
