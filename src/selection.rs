//! 매질/온도/밀도 선택 상태 머신.
//! 파생 계산은 `select_temperature` 안에서 동기적으로 한 번만 일어나며,
//! 뷰 계층에 대한 부수효과는 반환되는 신호로만 전달한다.

use crate::medium_db::{DensityTable, OTHER_MEDIUM};

/// 선택 상태가 어느 단계까지 채워졌는지 나타낸다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionPhase {
    Empty,
    MediumChosen,
    FullySpecified,
}

/// 코어가 뷰 계층에 요청하는 부수효과 신호.
/// 코어는 UI 요소를 직접 만지지 않는다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiSignal {
    /// 밀도 입력 필드로 포커스를 옮겨라.
    FocusDensity,
}

/// 표시용 상태 알림. 문자열 변환은 뷰 계층이 i18n으로 수행한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// 밀도가 테이블 조회로 자동 채워졌음
    AutoDerived,
}

/// 온도 선택이 거부된 이유. 상태는 변하지 않는다.
/// 뷰 계층이 유효한 선택지만 내놓는 것이 원칙이라 방어적 불변식에 가깝다.
#[derive(Debug)]
pub enum SelectionError {
    MediumNotChosen,
    BucketNotInMedium { bucket: String },
}

impl std::fmt::Display for SelectionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SelectionError::MediumNotChosen => write!(f, "매질을 먼저 선택해야 합니다."),
            SelectionError::BucketNotInMedium { bucket } => {
                write!(f, "현재 매질에 없는 온도 구간입니다: {bucket}")
            }
        }
    }
}

impl std::error::Error for SelectionError {}

/// 세션 하나가 소유하는 선택 상태.
/// 비어 있는 상태로 만들어져 아래 세 연산으로만 변경된다.
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    medium: Option<String>,
    temperature: Option<String>,
    density: Option<f64>,
    status: Option<Notice>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn medium(&self) -> Option<&str> {
        self.medium.as_deref()
    }

    pub fn temperature(&self) -> Option<&str> {
        self.temperature.as_deref()
    }

    pub fn density(&self) -> Option<f64> {
        self.density
    }

    pub fn status(&self) -> Option<Notice> {
        self.status
    }

    pub fn phase(&self) -> SelectionPhase {
        match (&self.medium, &self.temperature, &self.density) {
            (None, _, _) => SelectionPhase::Empty,
            (Some(_), Some(_), Some(_)) => SelectionPhase::FullySpecified,
            _ => SelectionPhase::MediumChosen,
        }
    }

    /// 표시용 밀도 문자열. 단위 없이 숫자만, 정수 값은 소수점 없이 돌려준다.
    pub fn density_text(&self) -> String {
        match self.density {
            Some(v) if v.fract() == 0.0 => format!("{v:.0}"),
            Some(v) => format!("{v}"),
            None => String::new(),
        }
    }

    /// 매질을 설정하고 종속 필드를 무조건 비운다.
    /// 같은 매질을 다시 선택해도 초기화는 동일하게 일어난다.
    pub fn select_medium(&mut self, medium: &str) {
        self.medium = Some(medium.to_string());
        self.temperature = None;
        self.density = None;
        self.status = None;
    }

    /// 온도 구간을 설정하고, "Other"가 아닌 매질이면 테이블에서 밀도를 유도한다.
    /// 조회 실패(구간은 유효하나 테이블에 값이 없음)는 오류가 아니며 기존 밀도를 건드리지 않는다.
    /// 수락된 호출은 매번 포커스 신호를 정확히 한 번 돌려준다.
    pub fn select_temperature(
        &mut self,
        table: &DensityTable,
        bucket: &str,
    ) -> Result<UiSignal, SelectionError> {
        let medium = match self.medium.clone() {
            Some(m) => m,
            None => return Err(SelectionError::MediumNotChosen),
        };
        if !table.buckets_for(&medium).iter().any(|b| *b == bucket) {
            return Err(SelectionError::BucketNotInMedium {
                bucket: bucket.to_string(),
            });
        }
        self.temperature = Some(bucket.to_string());
        if medium != OTHER_MEDIUM {
            if let Some(derived) = table.density_for(&medium, bucket) {
                if self.density != Some(derived) {
                    self.density = Some(derived);
                    self.status = Some(Notice::AutoDerived);
                }
            }
        }
        Ok(UiSignal::FocusDensity)
    }

    /// 수기 밀도 입력. 0 이상의 유한한 수만 받아들이고 성공 시 자동 유도 알림을 지운다.
    /// 거부된 입력은 조용히 무시되어 기존 값이 유지된다.
    /// 빈 입력은 값 삭제로 취급한다.
    pub fn set_density(&mut self, raw: &str) -> bool {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            self.density = None;
            self.status = None;
            return true;
        }
        match trimmed.parse::<f64>() {
            Ok(v) if v.is_finite() && v >= 0.0 => {
                self.density = Some(v);
                self.status = None;
                true
            }
            _ => false,
        }
    }
}
