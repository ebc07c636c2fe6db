use serde::{Deserialize, Serialize};

/// 평균 전기차 전비 [kWh/km].
pub const DEFAULT_CONSUMPTION_KWH_PER_KM: f64 = 0.2;
/// 공용 충전 기준 단가 [€/kWh].
pub const DEFAULT_PUBLIC_PRICE_PER_KWH: f64 = 0.60;
/// 분석 기간 기본값 [년].
pub const DEFAULT_YEARS_TO_PROJECT: u32 = 10;

/// 투자비 회수 계산 입력. 범위 검증은 호출 측(`validation`)에서 끝낸 값이라고 가정한다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatorInput {
    /// 연간 주행거리 [km]
    pub km_per_year: f64,
    /// 가정용 전기 단가 [€/kWh]
    pub electricity_cost: f64,
    /// 월박스 설치비(기기 + 시공) [€]
    pub wallbox_cost: f64,
    /// 분석 기간 [년]. 없으면 10년.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub years_to_project: Option<u32>,
}

impl CalculatorInput {
    pub fn new(km_per_year: f64, electricity_cost: f64, wallbox_cost: f64) -> Self {
        Self {
            km_per_year,
            electricity_cost,
            wallbox_cost,
            years_to_project: None,
        }
    }

    pub fn with_years(mut self, years: u32) -> Self {
        self.years_to_project = Some(years);
        self
    }

    /// 실제로 사용할 분석 기간.
    pub fn years(&self) -> u32 {
        self.years_to_project.unwrap_or(DEFAULT_YEARS_TO_PROJECT)
    }
}

/// 회수 계산 결과. 네 개의 시계열은 모두 길이가 분석 기간과 같다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatorResult {
    /// 연간 절감액 [€/년]
    pub savings_per_year: f64,
    /// 월간 절감액 [€/월]
    pub savings_per_month: f64,
    /// 단순 회수기간 [년]. 절감액이 0 이하이면 유한값이 아닐 수 있다.
    pub break_even_year: f64,
    /// 분석 기간 말의 누적 순절감액(투자비 차감) [€]
    pub total_savings: f64,
    /// 연도별 가정 충전 누적 비용 [€]
    pub home_costs: Vec<f64>,
    /// 연도별 공용 충전 누적 비용 [€]
    pub public_costs: Vec<f64>,
    /// 연도별 누적 순절감액 [€]
    pub cumulative_savings: Vec<f64>,
    /// 연도 라벨 1..=N
    pub years_data: Vec<u32>,
    /// 연간 소비 전력량 [kWh]
    pub annual_consumption_kwh: f64,
    /// 가정 충전 연간 비용 [€]
    pub home_cost_per_year: f64,
    /// 공용 충전 연간 비용 [€]
    pub public_cost_per_year: f64,
    /// 투자비 [€]
    pub wallbox_cost: f64,
}

/// 회수기간을 표시용으로 분류한 값.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Payback {
    /// 유한하고 음수가 아닌 회수기간 [년]
    Years(f64),
    /// 절감액이 0 이하라서 회수되지 않음
    Never,
}

/// 결과 표의 한 행.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YearRow {
    pub year: u32,
    pub home_cost: f64,
    pub public_cost: f64,
    pub cumulative_savings: f64,
}

impl CalculatorResult {
    /// `break_even_year`를 그대로 두고 표시용 분류만 돌려준다.
    pub fn payback(&self) -> Payback {
        if self.break_even_year.is_finite() && self.break_even_year >= 0.0 {
            Payback::Years(self.break_even_year)
        } else {
            Payback::Never
        }
    }

    /// 투자비 대비 누적 순절감 비율.
    pub fn roi_ratio(&self) -> f64 {
        self.total_savings / self.wallbox_cost
    }

    pub fn horizon(&self) -> usize {
        self.years_data.len()
    }

    pub fn rows(&self) -> impl Iterator<Item = YearRow> + '_ {
        self.years_data
            .iter()
            .zip(&self.home_costs)
            .zip(&self.public_costs)
            .zip(&self.cumulative_savings)
            .map(|(((year, home), public), cumulative)| YearRow {
                year: *year,
                home_cost: *home,
                public_cost: *public,
                cumulative_savings: *cumulative,
            })
    }
}

/// 모델 상수(전비, 공용 충전 단가)를 묶은 계산기.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoiModel {
    /// 전비 [kWh/km]
    pub consumption_kwh_per_km: f64,
    /// 공용 충전 단가 [€/kWh]
    pub public_price_per_kwh: f64,
}

impl Default for RoiModel {
    fn default() -> Self {
        Self {
            consumption_kwh_per_km: DEFAULT_CONSUMPTION_KWH_PER_KM,
            public_price_per_kwh: DEFAULT_PUBLIC_PRICE_PER_KWH,
        }
    }
}

impl RoiModel {
    pub fn new(consumption_kwh_per_km: f64, public_price_per_kwh: f64) -> Self {
        Self {
            consumption_kwh_per_km,
            public_price_per_kwh,
        }
    }

    /// 가정 충전과 공용 충전의 누적 비용, 절감액, 회수기간을 계산한다.
    ///
    /// 반올림하지 않으며 입력 범위도 검사하지 않는다. 절감액이 0이면
    /// 회수기간은 무한대(0/0이면 NaN)로 그대로 반환된다.
    pub fn project(&self, input: &CalculatorInput) -> CalculatorResult {
        let years = input.years();
        let annual_consumption_kwh = input.km_per_year * self.consumption_kwh_per_km;
        let home_cost_per_year = annual_consumption_kwh * input.electricity_cost;
        let public_cost_per_year = annual_consumption_kwh * self.public_price_per_kwh;
        let savings_per_year = public_cost_per_year - home_cost_per_year;
        let savings_per_month = savings_per_year / 12.0;
        let break_even_year = input.wallbox_cost / savings_per_year;

        let capacity = years as usize;
        let mut years_data = Vec::with_capacity(capacity);
        let mut home_costs = Vec::with_capacity(capacity);
        let mut public_costs = Vec::with_capacity(capacity);
        let mut cumulative_savings = Vec::with_capacity(capacity);

        let mut running = -input.wallbox_cost;
        for year in 1..=years {
            years_data.push(year);
            home_costs.push(home_cost_per_year * f64::from(year));
            public_costs.push(public_cost_per_year * f64::from(year));
            running += savings_per_year;
            cumulative_savings.push(running);
        }

        // 기간이 0이면 투자 직후의 순위치
        let total_savings = cumulative_savings
            .last()
            .copied()
            .unwrap_or(-input.wallbox_cost);

        CalculatorResult {
            savings_per_year,
            savings_per_month,
            break_even_year,
            total_savings,
            home_costs,
            public_costs,
            cumulative_savings,
            years_data,
            annual_consumption_kwh,
            home_cost_per_year,
            public_cost_per_year,
            wallbox_cost: input.wallbox_cost,
        }
    }
}

/// 기본 모델 상수로 계산한다.
pub fn calculate_roi(input: &CalculatorInput) -> CalculatorResult {
    RoiModel::default().project(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_horizon_is_ten_years() {
        let input = CalculatorInput::new(15_000.0, 0.30, 2_200.0);
        assert_eq!(input.years(), 10);
        assert_eq!(calculate_roi(&input).horizon(), 10);
    }

    #[test]
    fn rows_follow_year_order() {
        let input = CalculatorInput::new(10_000.0, 0.25, 1_500.0).with_years(3);
        let res = calculate_roi(&input);
        let years: Vec<u32> = res.rows().map(|r| r.year).collect();
        assert_eq!(years, vec![1, 2, 3]);
        let last = res.rows().last().unwrap();
        assert_eq!(last.cumulative_savings, res.total_savings);
    }

    #[test]
    fn payback_never_for_negative_savings() {
        let input = CalculatorInput::new(15_000.0, 0.80, 2_200.0);
        let res = calculate_roi(&input);
        assert!(res.break_even_year < 0.0);
        assert_eq!(res.payback(), Payback::Never);
    }
}
