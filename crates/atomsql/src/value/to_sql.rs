use super::Value;
use bytes::BytesMut;
use std::error::Error;
use tokio_postgres::types::{IsNull, Kind, ToSql, Type};

type BoxError = Box<dyn Error + Sync + Send>;

/// Encode through `T`, refusing Postgres types `T` cannot represent.
fn encode<T: ToSql>(value: &T, ty: &Type, out: &mut BytesMut) -> Result<IsNull, BoxError> {
    if !T::accepts(ty) {
        return Err(format!(
            "cannot bind {} to a parameter of type {ty}",
            std::any::type_name::<T>()
        )
        .into());
    }
    value.to_sql(ty, out)
}

impl ToSql for Value {
    fn to_sql(&self, ty: &Type, out: &mut BytesMut) -> Result<IsNull, BoxError> {
        if matches!(*ty, Type::JSON | Type::JSONB) && !self.is_null() {
            let json = serde_json::to_value(self)?;
            return json.to_sql(ty, out);
        }

        match self {
            Value::Null => Ok(IsNull::Yes),
            Value::Bool(b) => encode(b, ty, out),
            Value::Int(i) => match *ty {
                Type::INT2 => encode(&i16::try_from(*i)?, ty, out),
                Type::INT4 => encode(&i32::try_from(*i)?, ty, out),
                Type::FLOAT4 => encode(&(*i as f32), ty, out),
                Type::FLOAT8 => encode(&(*i as f64), ty, out),
                _ => encode(i, ty, out),
            },
            Value::Float(x) => match *ty {
                Type::FLOAT4 => encode(&(*x as f32), ty, out),
                _ => encode(x, ty, out),
            },
            Value::Text(s) | Value::Regex(s) => encode(&s.as_str(), ty, out),
            Value::Date(d) => match *ty {
                Type::TIMESTAMP => encode(&d.naive_utc(), ty, out),
                Type::DATE => encode(&d.date_naive(), ty, out),
                _ => encode(d, ty, out),
            },
            Value::Array(items) => {
                if !matches!(ty.kind(), Kind::Array(_)) {
                    return Err(format!("cannot bind an array to a parameter of type {ty}").into());
                }
                items.to_sql(ty, out)
            }
        }
    }

    // Per-variant checks happen in `to_sql`.
    fn accepts(_ty: &Type) -> bool {
        true
    }

    tokio_postgres::types::to_sql_checked!();
}
