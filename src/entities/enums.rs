//! Categorical columns. Every enum is stored as an integer so existing rows keep
//! their meaning when variants are appended.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
pub enum Location {
    #[sea_orm(num_value = 1)]
    Indoor,
    #[sea_orm(num_value = 2)]
    Outdoor,
    #[sea_orm(num_value = 3)]
    Greenhouse,
    #[sea_orm(num_value = 4)]
    GrowRoom,
    #[sea_orm(num_value = 5)]
    Basement,
    #[sea_orm(num_value = 6)]
    Balcony,
    #[sea_orm(num_value = 7)]
    Garage,
    #[sea_orm(num_value = 8)]
    Rooftop,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
pub enum GardenType {
    #[sea_orm(num_value = 1)]
    Vegetable,
    #[sea_orm(num_value = 2)]
    Herb,
    #[sea_orm(num_value = 3)]
    Flower,
    #[sea_orm(num_value = 4)]
    Fruit,
    #[sea_orm(num_value = 5)]
    Succulent,
    #[sea_orm(num_value = 6)]
    Mixed,
    #[sea_orm(num_value = 7)]
    Other,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
pub enum GrowMethod {
    #[sea_orm(num_value = 1)]
    Soil,
    #[sea_orm(num_value = 2)]
    Hydroponic,
    #[sea_orm(num_value = 3)]
    Aeroponic,
    #[sea_orm(num_value = 4)]
    Aquaponic,
    #[sea_orm(num_value = 5)]
    Coco,
    #[sea_orm(num_value = 6)]
    Container,
    #[sea_orm(num_value = 7)]
    RaisedBed,
    #[sea_orm(num_value = 8)]
    Other,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
pub enum PlantType {
    #[sea_orm(num_value = 1)]
    Vegetable,
    #[sea_orm(num_value = 2)]
    Herb,
    #[sea_orm(num_value = 3)]
    Flower,
    #[sea_orm(num_value = 4)]
    Fruit,
    #[sea_orm(num_value = 5)]
    Tree,
    #[sea_orm(num_value = 6)]
    Shrub,
    #[sea_orm(num_value = 7)]
    Succulent,
    #[sea_orm(num_value = 8)]
    Houseplant,
    #[sea_orm(num_value = 9)]
    Other,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
pub enum LightingRequirement {
    #[sea_orm(num_value = 1)]
    Low,
    #[sea_orm(num_value = 2)]
    Medium,
    #[sea_orm(num_value = 3)]
    High,
    #[sea_orm(num_value = 4)]
    FullSun,
    #[sea_orm(num_value = 5)]
    PartialShade,
    #[sea_orm(num_value = 6)]
    Shade,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
pub enum PlantCondition {
    #[sea_orm(num_value = 1)]
    Healthy,
    #[sea_orm(num_value = 2)]
    Wilting,
    #[sea_orm(num_value = 3)]
    Overwatered,
    #[sea_orm(num_value = 4)]
    Underwatered,
    #[sea_orm(num_value = 5)]
    PestInfested,
    #[sea_orm(num_value = 6)]
    Diseased,
    #[sea_orm(num_value = 7)]
    Dying,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
pub enum EquipmentType {
    #[sea_orm(num_value = 1)]
    GrowTent,
    #[sea_orm(num_value = 2)]
    Lighting,
    #[sea_orm(num_value = 3)]
    Ventilation,
    #[sea_orm(num_value = 4)]
    Circulation,
    #[sea_orm(num_value = 5)]
    Irrigation,
    #[sea_orm(num_value = 6)]
    Nutrients,
    #[sea_orm(num_value = 7)]
    Tools,
    #[sea_orm(num_value = 8)]
    Heating,
    #[sea_orm(num_value = 9)]
    Cooling,
    #[sea_orm(num_value = 10)]
    Humidifier,
    #[sea_orm(num_value = 11)]
    Dehumidifier,
    #[sea_orm(num_value = 12)]
    MonitoringDevices,
    #[sea_orm(num_value = 13)]
    HydroponicSystems,
    #[sea_orm(num_value = 14)]
    SmartGrowSystems,
    #[sea_orm(num_value = 15)]
    Other,
}

/// Lifecycle of an equipment servicing request.
///
/// `Operational -> MaintenanceRequested -> UnderMaintenance -> Completed`, after
/// which the equipment itself returns to `Operational`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
pub enum MaintenanceStatus {
    #[sea_orm(num_value = 1)]
    Operational,
    #[sea_orm(num_value = 2)]
    MaintenanceRequested,
    #[sea_orm(num_value = 3)]
    UnderMaintenance,
    #[sea_orm(num_value = 4)]
    Completed,
}

impl MaintenanceStatus {
    /// A record in one of these states blocks a new request for the same equipment.
    pub fn is_active(self) -> bool {
        matches!(self, Self::MaintenanceRequested | Self::UnderMaintenance)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
pub enum CareActivityType {
    #[sea_orm(num_value = 1)]
    VisualInspection,
    #[sea_orm(num_value = 2)]
    Watering,
    #[sea_orm(num_value = 3)]
    AddingNutrients,
    #[sea_orm(num_value = 4)]
    NewPlantings,
    #[sea_orm(num_value = 5)]
    Weeding,
    #[sea_orm(num_value = 6)]
    Pruning,
    #[sea_orm(num_value = 7)]
    PestControl,
    #[sea_orm(num_value = 8)]
    WaterLevelCheck,
    #[sea_orm(num_value = 9)]
    PhEcAdjustment,
    #[sea_orm(num_value = 10)]
    GardenOpening,
    #[sea_orm(num_value = 11)]
    GardenClosing,
    #[sea_orm(num_value = 12)]
    Harvesting,
    #[sea_orm(num_value = 13)]
    GeneralMaintenance,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
pub enum PlantInspectionStatus {
    #[sea_orm(num_value = 1)]
    AllHealthy,
    #[sea_orm(num_value = 2)]
    MinorIssues,
    #[sea_orm(num_value = 3)]
    ActionRequired,
    #[sea_orm(num_value = 4)]
    Critical,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
pub enum EquipmentInspectionStatus {
    #[sea_orm(num_value = 1)]
    AllOperational,
    #[sea_orm(num_value = 2)]
    MinorIssues,
    #[sea_orm(num_value = 3)]
    NeedsMaintenance,
    #[sea_orm(num_value = 4)]
    Failure,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
pub enum GardenStatus {
    #[sea_orm(num_value = 1)]
    Opened,
    #[sea_orm(num_value = 2)]
    Closed,
    #[sea_orm(num_value = 3)]
    Active,
    #[sea_orm(num_value = 4)]
    Inactive,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
pub enum PlantCareActivityType {
    #[sea_orm(num_value = 1)]
    InitialPlanting,
    #[sea_orm(num_value = 2)]
    Watering,
    #[sea_orm(num_value = 3)]
    Fertilizing,
    #[sea_orm(num_value = 4)]
    LightAdjustment,
    #[sea_orm(num_value = 5)]
    Pruning,
    #[sea_orm(num_value = 6)]
    SupportStaking,
    #[sea_orm(num_value = 7)]
    PestControl,
    #[sea_orm(num_value = 8)]
    DiseaseTreatment,
    #[sea_orm(num_value = 9)]
    GrowthMonitoring,
    #[sea_orm(num_value = 10)]
    EnvironmentalCheck,
    #[sea_orm(num_value = 11)]
    Transplanting,
    #[sea_orm(num_value = 12)]
    Harvesting,
    #[sea_orm(num_value = 13)]
    PlantRemoval,
    #[sea_orm(num_value = 14)]
    GeneralMaintenance,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
pub enum MoistureLevel {
    #[sea_orm(num_value = 1)]
    Dry,
    #[sea_orm(num_value = 2)]
    SlightlyMoist,
    #[sea_orm(num_value = 3)]
    Moist,
    #[sea_orm(num_value = 4)]
    VeryMoist,
    #[sea_orm(num_value = 5)]
    Saturated,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
pub enum LightSource {
    #[sea_orm(num_value = 1)]
    NaturalSunlight,
    #[sea_orm(num_value = 2)]
    LedGrowLight,
    #[sea_orm(num_value = 3)]
    FluorescentLight,
    #[sea_orm(num_value = 4)]
    HidLight,
    #[sea_orm(num_value = 5)]
    MixedLighting,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
pub enum LightIntensity {
    #[sea_orm(num_value = 1)]
    Low,
    #[sea_orm(num_value = 2)]
    Medium,
    #[sea_orm(num_value = 3)]
    High,
    #[sea_orm(num_value = 4)]
    VeryHigh,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
pub enum PlantHealthStatus {
    #[sea_orm(num_value = 1)]
    Excellent,
    #[sea_orm(num_value = 2)]
    Good,
    #[sea_orm(num_value = 3)]
    Fair,
    #[sea_orm(num_value = 4)]
    Poor,
    #[sea_orm(num_value = 5)]
    Critical,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
pub enum HarvestQuality {
    #[sea_orm(num_value = 1)]
    Excellent,
    #[sea_orm(num_value = 2)]
    Good,
    #[sea_orm(num_value = 3)]
    Fair,
    #[sea_orm(num_value = 4)]
    Poor,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
pub enum ReminderType {
    #[sea_orm(num_value = 0)]
    DailyRecord,
    #[sea_orm(num_value = 1)]
    Watering,
    #[sea_orm(num_value = 2)]
    Fertilizing,
    #[sea_orm(num_value = 3)]
    Pruning,
    #[sea_orm(num_value = 4)]
    PestControl,
    #[sea_orm(num_value = 5)]
    Harvesting,
    #[sea_orm(num_value = 6)]
    Planting,
    #[sea_orm(num_value = 7)]
    Maintenance,
    #[sea_orm(num_value = 8)]
    Inspection,
    #[sea_orm(num_value = 9)]
    GeneralTask,
    #[sea_orm(num_value = 10)]
    CustomReminder,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
pub enum RecurrencePattern {
    #[sea_orm(num_value = 1)]
    Daily,
    #[sea_orm(num_value = 2)]
    Weekly,
    #[sea_orm(num_value = 3)]
    BiWeekly,
    #[sea_orm(num_value = 4)]
    Monthly,
    #[sea_orm(num_value = 5)]
    Quarterly,
    #[sea_orm(num_value = 6)]
    Yearly,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
pub enum ReminderPriority {
    #[sea_orm(num_value = 1)]
    Low,
    #[default]
    #[sea_orm(num_value = 2)]
    Normal,
    #[sea_orm(num_value = 3)]
    High,
    #[sea_orm(num_value = 4)]
    Urgent,
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::ActiveEnum;

    #[test]
    fn stored_values_match_existing_rows() {
        assert_eq!(MaintenanceStatus::Operational.to_value(), 1);
        assert_eq!(MaintenanceStatus::Completed.to_value(), 4);
        assert_eq!(ReminderType::DailyRecord.to_value(), 0);
        assert_eq!(ReminderType::CustomReminder.to_value(), 10);
        assert_eq!(EquipmentType::Other.to_value(), 15);
        assert_eq!(
            RecurrencePattern::try_from_value(&3).unwrap(),
            RecurrencePattern::BiWeekly
        );
    }

    #[test]
    fn only_requested_and_in_progress_are_active() {
        assert!(!MaintenanceStatus::Operational.is_active());
        assert!(MaintenanceStatus::MaintenanceRequested.is_active());
        assert!(MaintenanceStatus::UnderMaintenance.is_active());
        assert!(!MaintenanceStatus::Completed.is_active());
    }

    #[test]
    fn enums_serialize_by_name() {
        let json = serde_json::to_string(&PlantHealthStatus::Excellent).unwrap();
        assert_eq!(json, "\"Excellent\"");
        let parsed: ReminderPriority = serde_json::from_str("\"Urgent\"").unwrap();
        assert_eq!(parsed, ReminderPriority::Urgent);
        assert_eq!(ReminderPriority::default(), ReminderPriority::Normal);
    }
}
