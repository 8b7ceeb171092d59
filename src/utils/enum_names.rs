/// 为无字段枚举生成静态名称表：`ALL`、`name()`、`Display`和`FromStr`
///
/// # 用法
/// ```ignore
/// impl_enum_names!(Status, "状态", [
///     (Running, "running"),
///     (Converged, "converged"),
/// ]);
/// ```
///
/// `FromStr`对大小写不敏感，未知名称返回`OptimError::UnknownName`。
/// 同时生成`TryFrom<String>`与`From<$ty> for &'static str`，
/// 枚举加上`#[serde(try_from = "String", into = "&'static str")]`后即按名称序列化。
#[macro_export]
macro_rules! impl_enum_names {
    ($ty:ident, $kind:literal, [$(($variant:ident, $name:literal)),+ $(,)?]) => {
        impl $ty {
            /// 全部取值（按声明顺序）
            pub const ALL: &'static [$ty] = &[$($ty::$variant),+];

            /// 名称
            pub const fn name(&self) -> &'static str {
                match self {
                    $($ty::$variant => $name,)+
                }
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.name())
            }
        }

        impl std::str::FromStr for $ty {
            type Err = $crate::errors::OptimError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let lower = s.trim().to_lowercase();
                Self::ALL
                    .iter()
                    .find(|value| value.name() == lower)
                    .copied()
                    .ok_or_else(|| $crate::errors::OptimError::UnknownName {
                        kind: $kind,
                        name: s.to_string(),
                    })
            }
        }

        // 供 `#[serde(try_from = "String", into = "&'static str")]` 使用，序列化结果与名称表一致
        impl TryFrom<String> for $ty {
            type Error = $crate::errors::OptimError;

            fn try_from(s: String) -> Result<Self, Self::Error> {
                s.parse()
            }
        }

        impl From<$ty> for &'static str {
            fn from(value: $ty) -> Self {
                value.name()
            }
        }
    };
}
