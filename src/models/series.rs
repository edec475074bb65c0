use serde::Serialize;

/// 一个数量（如逐行毛重）的数值序列及其算术平均值
///
/// 序列为空时 `mean` 为 `None`（JSON 中为 null），不做除零。
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NumericSeries {
    pub values: Vec<f64>,
    pub mean: Option<f64>,
}

impl NumericSeries {
    pub fn from_values(values: Vec<f64>) -> Self {
        let mean = if values.is_empty() {
            None
        } else {
            Some(values.iter().sum::<f64>() / values.len() as f64)
        };
        Self { values, mean }
    }

    /// 空序列哨兵
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }
}
