//! 매질별 온도 구간-밀도 참조 테이블. 조회와 열거만 제공한다.
//! 값은 참고용 물성치이며 실제 공정 설계 시 최신 물성 데이터로 검증해야 한다.

use serde::Deserialize;
use std::fs;
use std::path::Path;

/// 사용자 정의 매질을 뜻하는 예약 이름.
/// 테이블에 값이 있더라도 이 매질에 대해서는 자동 유도를 수행하지 않는다.
pub const OTHER_MEDIUM: &str = "Other";

/// 온도 구간 라벨과 해당 밀도(kg/m³).
/// 밀도가 없는 구간도 허용된다. 그런 구간은 선택지로는 나오지만 조회는 실패한다.
#[derive(Debug, Clone, Deserialize)]
pub struct DensityPoint {
    pub bucket: String,
    #[serde(default)]
    pub density: Option<f64>,
}

/// 한 매질의 온도 구간별 밀도 목록.
/// 구간 순서는 테이블에 정의된 순서를 그대로 따르며 매질마다 눈금이 다르다.
#[derive(Debug, Clone, Deserialize)]
pub struct MediumEntry {
    pub name: String,
    #[serde(default)]
    pub notes: String,
    pub points: Vec<DensityPoint>,
}

/// 테이블 로드/검증 시 발생 가능한 오류.
#[derive(Debug)]
pub enum TableError {
    /// 파일 입출력 오류
    Io(std::io::Error),
    /// TOML 파싱 오류
    Parse(toml::de::Error),
    /// 매질이 하나도 없음
    Empty,
    /// 매질 이름 중복
    DuplicateMedium(String),
    /// 한 매질 안에서 온도 구간 라벨 중복
    DuplicateBucket { medium: String, bucket: String },
    /// 음수이거나 유한하지 않은 밀도
    InvalidDensity { medium: String, bucket: String },
}

impl std::fmt::Display for TableError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableError::Io(e) => write!(f, "파일 입출력 오류: {e}"),
            TableError::Parse(e) => write!(f, "테이블 파싱 오류: {e}"),
            TableError::Empty => write!(f, "테이블에 매질이 없습니다."),
            TableError::DuplicateMedium(name) => {
                write!(f, "매질 이름이 중복됩니다: {name}")
            }
            TableError::DuplicateBucket { medium, bucket } => {
                write!(f, "온도 구간이 중복됩니다: {medium} / {bucket}")
            }
            TableError::InvalidDensity { medium, bucket } => {
                write!(f, "밀도는 0 이상의 유한한 값이어야 합니다: {medium} / {bucket}")
            }
        }
    }
}

impl std::error::Error for TableError {}

impl From<std::io::Error> for TableError {
    fn from(value: std::io::Error) -> Self {
        TableError::Io(value)
    }
}

impl From<toml::de::Error> for TableError {
    fn from(value: toml::de::Error) -> Self {
        TableError::Parse(value)
    }
}

/// 불변 밀도 참조 테이블.
/// 프로세스 시작 시 한 번 만들어 모든 선택 세션이 읽기 전용으로 공유한다.
#[derive(Debug, Clone)]
pub struct DensityTable {
    media: Vec<MediumEntry>,
}

#[derive(Debug, Deserialize)]
struct TableFile {
    #[serde(default)]
    medium: Vec<MediumEntry>,
}

impl DensityTable {
    /// 내장 기본 테이블을 만든다.
    pub fn built_in() -> Self {
        let mut media = vec![
            entry("Wasser", "포화선 부근 물 밀도; 점 샘플 참고치", WASSER),
            entry(
                "Cooling water with antifreeze (20% Ethylene glycol, pH >=7,5)",
                "에틸렌글리콜 20% 혼합 냉각수; 참고치",
                ANTIFREEZE,
            ),
            entry(
                "Thermal oil (Example: BP Transcal N)",
                "열매체유; 120 ℃ 초과 구간은 성긴 눈금",
                THERMAL_OIL,
            ),
        ];
        // "Other"는 수기 입력용 온도 눈금만 제공한다. 밀도 값은 두지 않는다.
        media.push(MediumEntry {
            name: OTHER_MEDIUM.to_string(),
            notes: "사용자 정의 매질; 밀도는 직접 입력".to_string(),
            points: (-3..=32)
                .map(|i| DensityPoint {
                    bucket: format!("{} ℃", i * 10),
                    density: None,
                })
                .collect(),
        });
        Self { media }
    }

    /// TOML 문자열에서 테이블을 만든다.
    pub fn from_toml_str(src: &str) -> Result<Self, TableError> {
        let file: TableFile = toml::from_str(src)?;
        Self::from_entries(file.medium)
    }

    /// TOML 파일에서 테이블을 로드한다.
    pub fn load(path: &Path) -> Result<Self, TableError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    fn from_entries(media: Vec<MediumEntry>) -> Result<Self, TableError> {
        validate(&media)?;
        Ok(Self { media })
    }

    /// 테이블에 정의된 순서대로 매질을 열거한다.
    pub fn media(&self) -> &[MediumEntry] {
        &self.media
    }

    pub fn find_medium(&self, name: &str) -> Option<&MediumEntry> {
        self.media.iter().find(|m| m.name == name)
    }

    /// 매질의 온도 구간 라벨을 테이블 순서대로 돌려준다.
    /// 비어 있거나 모르는 매질이면 빈 목록.
    pub fn buckets_for(&self, medium: &str) -> Vec<&str> {
        self.find_medium(medium)
            .map(|m| m.points.iter().map(|p| p.bucket.as_str()).collect())
            .unwrap_or_default()
    }

    /// 정확히 일치하는 키로만 밀도를 조회한다. 보간이나 다른 매질로의 폴백은 없다.
    /// 구간은 있어도 값이 없으면 None.
    pub fn density_for(&self, medium: &str, bucket: &str) -> Option<f64> {
        self.find_medium(medium)?
            .points
            .iter()
            .find(|p| p.bucket == bucket)
            .and_then(|p| p.density)
    }
}

fn validate(media: &[MediumEntry]) -> Result<(), TableError> {
    if media.is_empty() {
        return Err(TableError::Empty);
    }
    for (i, m) in media.iter().enumerate() {
        if media[..i].iter().any(|prev| prev.name == m.name) {
            return Err(TableError::DuplicateMedium(m.name.clone()));
        }
        for (j, p) in m.points.iter().enumerate() {
            if m.points[..j].iter().any(|prev| prev.bucket == p.bucket) {
                return Err(TableError::DuplicateBucket {
                    medium: m.name.clone(),
                    bucket: p.bucket.clone(),
                });
            }
            if let Some(d) = p.density {
                if !d.is_finite() || d < 0.0 {
                    return Err(TableError::InvalidDensity {
                        medium: m.name.clone(),
                        bucket: p.bucket.clone(),
                    });
                }
            }
        }
    }
    Ok(())
}

fn entry(name: &str, notes: &str, points: &[(&str, f64)]) -> MediumEntry {
    MediumEntry {
        name: name.to_string(),
        notes: notes.to_string(),
        points: points
            .iter()
            .map(|(bucket, density)| DensityPoint {
                bucket: (*bucket).to_string(),
                density: Some(*density),
            })
            .collect(),
    }
}

const WASSER: &[(&str, f64)] = &[
    ("0 ℃", 1000.0),
    ("20 ℃", 998.0),
    ("40 ℃", 992.0),
    ("60 ℃", 983.0),
    ("80 ℃", 972.0),
    ("100 ℃", 958.0),
    ("120 ℃", 943.0),
    ("140 ℃", 926.0),
    ("150 ℃", 917.0),
    ("160 ℃", 907.0),
    ("170 ℃", 897.0),
    ("180 ℃", 887.0),
    ("190 ℃", 876.0),
    ("200 ℃", 865.0),
    ("210 ℃", 853.0),
    ("220 ℃", 840.0),
    ("230 ℃", 826.0),
    ("240 ℃", 814.0),
];

const ANTIFREEZE: &[(&str, f64)] = &[
    ("-10 ℃", 1034.0),
    ("0 ℃", 1032.0),
    ("20 ℃", 1026.0),
    ("40 ℃", 1018.0),
    ("60 ℃", 1007.0),
    ("80 ℃", 994.0),
    ("100 ℃", 979.0),
    ("120 ℃", 962.0),
];

const THERMAL_OIL: &[(&str, f64)] = &[
    ("0 ℃", 889.0),
    ("20 ℃", 876.0),
    ("40 ℃", 863.0),
    ("60 ℃", 850.0),
    ("80 ℃", 837.0),
    ("100 ℃", 824.0),
    ("120 ℃", 811.0),
    ("160 ℃", 784.0),
    ("200 ℃", 758.0),
    ("220 ℃", 745.0),
    ("240 ℃", 732.0),
    ("280 ℃", 706.0),
    ("320 ℃", 680.0),
];

// NOTE:
// - 과거 개정판마다 서로 다른 구간 눈금(10도 범위 vs 점 샘플)이 섞여 있었다.
//   여기서는 점 샘플 라벨("<t> ℃") 한 가지 규약으로 통일했다.
// - "Other"는 밀도 값 없이 온도 눈금만 둔다. 자동 유도 경로는 이 매질을 조회하지 않는다.
