//! Warehouse parameter snapshot and validation
//!
//! A [`WarehouseParameters`] value is the full, immutable input of one
//! computation. What-if evaluations go through [`ParamKey::with_param`],
//! which clones the snapshot and overrides exactly one field.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, WarehouseError};
use crate::finance::constants::{
    SHARE_SUM_ABS_TOLERANCE, SHARE_SUM_REL_TOLERANCE, VIP_EXTRA_FEE_SCAN,
};
use crate::types::{Area, Fraction, Money, PerType, Rate, StorageType};

/// Tariffs charged to customers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tariffs {
    /// Plain storage fee per m² per month
    pub storage_fee: Money,
    /// Extra VIP fee per m² per month, on top of the storage fee
    pub vip_extra_fee: Money,
    /// Short-term storage rate per m² per day
    pub short_term_daily_rate: Money,
}

impl Default for Tariffs {
    fn default() -> Self {
        Self {
            storage_fee: 1500.0,
            vip_extra_fee: 0.0,
            short_term_daily_rate: 60.0,
        }
    }
}

/// Collateral loan terms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoanTerms {
    /// Fraction of an item's value that is lent against it
    pub item_evaluation: Fraction,
    /// Average item value
    pub average_item_value: Money,
    /// Daily interest rate, in percent
    pub loan_interest_rate: Rate,
    /// Markup on realized (liquidated) items, in percent
    pub item_realization_markup: Rate,
}

impl Default for LoanTerms {
    fn default() -> Self {
        Self {
            item_evaluation: 0.8,
            average_item_value: 10_000.0,
            loan_interest_rate: 0.317,
            item_realization_markup: 20.0,
        }
    }
}

/// Monthly and one-time expenses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Expenses {
    pub salary: Money,
    pub miscellaneous: Money,
    pub depreciation: Money,
    pub marketing: Money,
    pub insurance: Money,
    pub taxes: Money,
    pub one_time_setup: Money,
    pub one_time_equipment: Money,
    pub one_time_other: Money,
}

impl Expenses {
    /// Monthly expenses excluding rent
    pub fn monthly_fixed(&self) -> Money {
        self.salary
            + self.miscellaneous
            + self.depreciation
            + self.marketing
            + self.insurance
            + self.taxes
    }

    pub fn one_time_total(&self) -> Money {
        self.one_time_setup + self.one_time_equipment + self.one_time_other
    }
}

impl Default for Expenses {
    fn default() -> Self {
        Self {
            salary: 240_000.0,
            miscellaneous: 50_000.0,
            depreciation: 20_000.0,
            marketing: 30_000.0,
            insurance: 10_000.0,
            taxes: 50_000.0,
            one_time_setup: 100_000.0,
            one_time_equipment: 200_000.0,
            one_time_other: 50_000.0,
        }
    }
}

/// Time dynamics and risk factors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskParameters {
    /// Whether the extended risk model is in effect
    pub enabled: bool,
    /// Forecast horizon in months
    pub time_horizon: u32,
    /// Monthly rent growth as a fraction (0.01 = 1 %)
    pub monthly_rent_growth: Fraction,
    /// Probability that a loan is not repaid
    pub default_probability: Fraction,
    pub liquidity_factor: f64,
    pub safety_factor: f64,
}

impl RiskParameters {
    /// Neutral profile used when the extended model is switched off
    pub fn neutral() -> Self {
        Self {
            enabled: false,
            time_horizon: 1,
            monthly_rent_growth: 0.0,
            default_probability: 0.0,
            liquidity_factor: 1.0,
            safety_factor: 1.0,
        }
    }

    /// The risk values the engine actually uses
    pub fn effective(&self) -> RiskParameters {
        if self.enabled {
            self.clone()
        } else {
            Self::neutral()
        }
    }
}

impl Default for RiskParameters {
    fn default() -> Self {
        Self {
            enabled: true,
            time_horizon: 6,
            monthly_rent_growth: 0.01,
            default_probability: 0.05,
            liquidity_factor: 1.0,
            safety_factor: 1.2,
        }
    }
}

/// Full input of one computation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WarehouseParameters {
    /// Total warehouse floor area
    pub total_area: Area,
    /// Rent per m² per month
    pub rental_cost_per_m2: Money,
    /// Fraction of the floor that can hold shelving
    pub useful_area_ratio: Fraction,
    pub shelves_per_m2: u32,
    /// Share of shelf area per storage type, summing to 1.0
    pub shares: PerType<Fraction>,
    pub tariffs: Tariffs,
    pub loans: LoanTerms,
    /// Items per m² of shelf area
    pub densities: PerType<f64>,
    /// Fraction of items that end up liquidated
    pub realization_shares: PerType<Fraction>,
    pub expenses: Expenses,
    pub risk: RiskParameters,
}

impl Default for WarehouseParameters {
    fn default() -> Self {
        Self {
            total_area: 250.0,
            rental_cost_per_m2: 1000.0,
            useful_area_ratio: 0.5,
            shelves_per_m2: 3,
            shares: PerType::new(0.5, 0.3, 0.1, 0.1),
            tariffs: Tariffs::default(),
            loans: LoanTerms::default(),
            densities: PerType::new(5.0, 5.0, 2.0, 4.0),
            realization_shares: PerType::splat(0.5),
            expenses: Expenses::default(),
            risk: RiskParameters::default(),
        }
    }
}

impl WarehouseParameters {
    /// Check domain constraints, collecting every violation
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();

        if self.total_area <= 0.0 {
            errors.push("Total area must be greater than zero".to_string());
        }
        if self.rental_cost_per_m2 <= 0.0 {
            errors.push("Rent per m² must be greater than zero".to_string());
        }
        let tariffs = [
            ("Storage fee", self.tariffs.storage_fee),
            ("VIP extra fee", self.tariffs.vip_extra_fee),
            ("Short-term daily rate", self.tariffs.short_term_daily_rate),
            ("Item realization markup", self.loans.item_realization_markup),
        ];
        for (label, value) in tariffs {
            if value < 0.0 {
                errors.push(format!("{} cannot be negative", label));
            }
        }
        if !(0.0..=1.0).contains(&self.useful_area_ratio) {
            errors.push("Useful area ratio must be between 0 and 1".to_string());
        }
        for (t, share) in self.shares.iter() {
            if !(0.0..=1.0).contains(share) {
                errors.push(format!("{} share must be between 0 and 1", t.label()));
            }
        }
        for (t, share) in self.realization_shares.iter() {
            if !(0.0..=1.0).contains(share) {
                errors.push(format!(
                    "{} realization share must be between 0 and 1",
                    t.label()
                ));
            }
        }
        for (t, density) in self.densities.iter() {
            if !density.is_finite() {
                errors.push(format!("{} item density must be a finite number", t.label()));
            } else if *density < 0.0 {
                errors.push(format!("{} item density cannot be negative", t.label()));
            }
        }
        if !(0.0..=1.0).contains(&self.loans.item_evaluation) {
            errors.push("Item evaluation must be between 0 and 1".to_string());
        }
        if self.loans.average_item_value < 0.0 {
            errors.push("Average item value cannot be negative".to_string());
        }

        let expenses = [
            ("Salary", self.expenses.salary),
            ("Miscellaneous expenses", self.expenses.miscellaneous),
            ("Depreciation", self.expenses.depreciation),
            ("Marketing expenses", self.expenses.marketing),
            ("Insurance expenses", self.expenses.insurance),
            ("Taxes", self.expenses.taxes),
            ("Setup cost", self.expenses.one_time_setup),
            ("Equipment cost", self.expenses.one_time_equipment),
            ("Other one-time costs", self.expenses.one_time_other),
        ];
        for (label, value) in expenses {
            if value < 0.0 {
                errors.push(format!("{} cannot be negative", label));
            }
        }

        if !(0.0..=1.0).contains(&self.risk.default_probability) {
            errors.push("Default probability must be between 0 and 1".to_string());
        } else if self.risk.enabled && self.risk.default_probability >= 1.0 {
            errors.push("Default probability must be below 1 with extended risk enabled".to_string());
        }
        if self.risk.monthly_rent_growth < 0.0 {
            errors.push("Monthly rent growth cannot be negative".to_string());
        }
        if self.risk.liquidity_factor <= 0.0 {
            errors.push("Liquidity factor must be greater than zero".to_string());
        }
        if self.risk.safety_factor <= 0.0 {
            errors.push("Safety factor must be greater than zero".to_string());
        }
        if self.risk.time_horizon == 0 {
            errors.push("Time horizon must be at least one month".to_string());
        }

        let total_shares = self.shares.sum();
        if (total_shares - 1.0).abs() > SHARE_SUM_ABS_TOLERANCE + SHARE_SUM_REL_TOLERANCE {
            errors.push(format!(
                "Storage shares must sum to 100% (got {:.2}%)",
                total_shares * 100.0
            ));
        }

        for key in ParamKey::ALL {
            if !key.get(self).is_finite() {
                errors.push(format!("{} must be a finite number", key));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(WarehouseError::Validation(errors))
        }
    }

    /// Clone with one field overridden
    pub fn with_param(&self, key: ParamKey, value: f64) -> WarehouseParameters {
        let mut updated = self.clone();
        key.set(&mut updated, value);
        updated
    }
}

/// Scalar inputs that can be overridden, swept or solved for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamKey {
    TotalArea,
    RentalCostPerM2,
    UsefulAreaRatio,
    StorageFee,
    VipExtraFee,
    ShortTermDailyRate,
    ItemEvaluation,
    AverageItemValue,
    LoanInterestRate,
    ItemRealizationMarkup,
    SalaryExpense,
    MiscellaneousExpenses,
    DepreciationExpense,
    MarketingExpenses,
    InsuranceExpenses,
    Taxes,
    OneTimeSetupCost,
    OneTimeEquipmentCost,
    OneTimeOtherCosts,
    MonthlyRentGrowth,
    DefaultProbability,
    LiquidityFactor,
    SafetyFactor,
}

impl ParamKey {
    pub const ALL: [ParamKey; 23] = [
        ParamKey::TotalArea,
        ParamKey::RentalCostPerM2,
        ParamKey::UsefulAreaRatio,
        ParamKey::StorageFee,
        ParamKey::VipExtraFee,
        ParamKey::ShortTermDailyRate,
        ParamKey::ItemEvaluation,
        ParamKey::AverageItemValue,
        ParamKey::LoanInterestRate,
        ParamKey::ItemRealizationMarkup,
        ParamKey::SalaryExpense,
        ParamKey::MiscellaneousExpenses,
        ParamKey::DepreciationExpense,
        ParamKey::MarketingExpenses,
        ParamKey::InsuranceExpenses,
        ParamKey::Taxes,
        ParamKey::OneTimeSetupCost,
        ParamKey::OneTimeEquipmentCost,
        ParamKey::OneTimeOtherCosts,
        ParamKey::MonthlyRentGrowth,
        ParamKey::DefaultProbability,
        ParamKey::LiquidityFactor,
        ParamKey::SafetyFactor,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ParamKey::TotalArea => "total_area",
            ParamKey::RentalCostPerM2 => "rental_cost_per_m2",
            ParamKey::UsefulAreaRatio => "useful_area_ratio",
            ParamKey::StorageFee => "storage_fee",
            ParamKey::VipExtraFee => "vip_extra_fee",
            ParamKey::ShortTermDailyRate => "short_term_daily_rate",
            ParamKey::ItemEvaluation => "item_evaluation",
            ParamKey::AverageItemValue => "average_item_value",
            ParamKey::LoanInterestRate => "loan_interest_rate",
            ParamKey::ItemRealizationMarkup => "item_realization_markup",
            ParamKey::SalaryExpense => "salary_expense",
            ParamKey::MiscellaneousExpenses => "miscellaneous_expenses",
            ParamKey::DepreciationExpense => "depreciation_expense",
            ParamKey::MarketingExpenses => "marketing_expenses",
            ParamKey::InsuranceExpenses => "insurance_expenses",
            ParamKey::Taxes => "taxes",
            ParamKey::OneTimeSetupCost => "one_time_setup_cost",
            ParamKey::OneTimeEquipmentCost => "one_time_equipment_cost",
            ParamKey::OneTimeOtherCosts => "one_time_other_costs",
            ParamKey::MonthlyRentGrowth => "monthly_rent_growth",
            ParamKey::DefaultProbability => "default_probability",
            ParamKey::LiquidityFactor => "liquidity_factor",
            ParamKey::SafetyFactor => "safety_factor",
        }
    }

    pub fn get(self, params: &WarehouseParameters) -> f64 {
        match self {
            ParamKey::TotalArea => params.total_area,
            ParamKey::RentalCostPerM2 => params.rental_cost_per_m2,
            ParamKey::UsefulAreaRatio => params.useful_area_ratio,
            ParamKey::StorageFee => params.tariffs.storage_fee,
            ParamKey::VipExtraFee => params.tariffs.vip_extra_fee,
            ParamKey::ShortTermDailyRate => params.tariffs.short_term_daily_rate,
            ParamKey::ItemEvaluation => params.loans.item_evaluation,
            ParamKey::AverageItemValue => params.loans.average_item_value,
            ParamKey::LoanInterestRate => params.loans.loan_interest_rate,
            ParamKey::ItemRealizationMarkup => params.loans.item_realization_markup,
            ParamKey::SalaryExpense => params.expenses.salary,
            ParamKey::MiscellaneousExpenses => params.expenses.miscellaneous,
            ParamKey::DepreciationExpense => params.expenses.depreciation,
            ParamKey::MarketingExpenses => params.expenses.marketing,
            ParamKey::InsuranceExpenses => params.expenses.insurance,
            ParamKey::Taxes => params.expenses.taxes,
            ParamKey::OneTimeSetupCost => params.expenses.one_time_setup,
            ParamKey::OneTimeEquipmentCost => params.expenses.one_time_equipment,
            ParamKey::OneTimeOtherCosts => params.expenses.one_time_other,
            ParamKey::MonthlyRentGrowth => params.risk.monthly_rent_growth,
            ParamKey::DefaultProbability => params.risk.default_probability,
            ParamKey::LiquidityFactor => params.risk.liquidity_factor,
            ParamKey::SafetyFactor => params.risk.safety_factor,
        }
    }

    fn set(self, params: &mut WarehouseParameters, value: f64) {
        let slot = match self {
            ParamKey::TotalArea => &mut params.total_area,
            ParamKey::RentalCostPerM2 => &mut params.rental_cost_per_m2,
            ParamKey::UsefulAreaRatio => &mut params.useful_area_ratio,
            ParamKey::StorageFee => &mut params.tariffs.storage_fee,
            ParamKey::VipExtraFee => &mut params.tariffs.vip_extra_fee,
            ParamKey::ShortTermDailyRate => &mut params.tariffs.short_term_daily_rate,
            ParamKey::ItemEvaluation => &mut params.loans.item_evaluation,
            ParamKey::AverageItemValue => &mut params.loans.average_item_value,
            ParamKey::LoanInterestRate => &mut params.loans.loan_interest_rate,
            ParamKey::ItemRealizationMarkup => &mut params.loans.item_realization_markup,
            ParamKey::SalaryExpense => &mut params.expenses.salary,
            ParamKey::MiscellaneousExpenses => &mut params.expenses.miscellaneous,
            ParamKey::DepreciationExpense => &mut params.expenses.depreciation,
            ParamKey::MarketingExpenses => &mut params.expenses.marketing,
            ParamKey::InsuranceExpenses => &mut params.expenses.insurance,
            ParamKey::Taxes => &mut params.expenses.taxes,
            ParamKey::OneTimeSetupCost => &mut params.expenses.one_time_setup,
            ParamKey::OneTimeEquipmentCost => &mut params.expenses.one_time_equipment,
            ParamKey::OneTimeOtherCosts => &mut params.expenses.one_time_other,
            ParamKey::MonthlyRentGrowth => &mut params.risk.monthly_rent_growth,
            ParamKey::DefaultProbability => &mut params.risk.default_probability,
            ParamKey::LiquidityFactor => &mut params.risk.liquidity_factor,
            ParamKey::SafetyFactor => &mut params.risk.safety_factor,
        };
        *slot = value;
    }

    /// Tariff-like parameter that drives a storage type's income
    pub fn for_storage_type(storage_type: StorageType) -> ParamKey {
        match storage_type {
            StorageType::Storage => ParamKey::StorageFee,
            StorageType::Loan => ParamKey::LoanInterestRate,
            StorageType::Vip => ParamKey::VipExtraFee,
            StorageType::ShortTerm => ParamKey::ShortTermDailyRate,
        }
    }

    /// Range swept when charting this parameter's effect on profit
    pub fn default_scan_range(self, params: &WarehouseParameters) -> (f64, f64) {
        match self {
            ParamKey::VipExtraFee => VIP_EXTRA_FEE_SCAN,
            _ => {
                let base = self.get(params);
                (base * 0.5, base * 1.5)
            }
        }
    }
}

impl fmt::Display for ParamKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ParamKey {
    type Err = WarehouseError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        ParamKey::ALL
            .into_iter()
            .find(|k| k.name() == normalized)
            .ok_or_else(|| WarehouseError::UnknownParameter(s.to_string()))
    }
}
