//! Display and Debug implementations for Value

use std::fmt;

use super::*;

/// A piece of output still to be written while rendering nested pairs.
enum Piece<'a> {
    Value(&'a Value),
    Text(&'static str),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut pending = vec![Piece::Value(self)];
        while let Some(piece) = pending.pop() {
            let value = match piece {
                Piece::Text(text) => {
                    f.write_str(text)?;
                    continue;
                }
                Piece::Value(value) => value,
            };
            match value {
                Value::Null => f.write_str("null")?,
                Value::Number(n) if n.is_integer() => write!(f, "{}", n.numer())?,
                Value::Number(n) => write!(f, "{}/{}", n.numer(), n.denom())?,
                Value::Pair(pair) => {
                    pending.push(Piece::Text(")"));
                    pending.push(Piece::Value(&pair.right));
                    pending.push(Piece::Text(", "));
                    pending.push(Piece::Value(&pair.left));
                    pending.push(Piece::Text("("));
                }
                Value::Function(func) => match &func.param {
                    Some(param) => write!(f, "<function {}>", param)?,
                    None => f.write_str("<function>")?,
                },
                Value::Builtin(builtin) => write!(f, "<built-in function {}>", builtin.name)?,
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "Null"),
            Value::Number(_) => write!(f, "Number({})", self),
            Value::Pair(_) => write!(f, "Pair{}", self),
            Value::Function(func) => write!(f, "{:?}", func),
            Value::Builtin(builtin) => write!(f, "{:?}", builtin),
        }
    }
}

impl fmt::Debug for Pair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:?}, {:?})", self.left, self.right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_numbers() {
        assert_eq!(Value::int(42).to_string(), "42");
        assert_eq!(Value::int(-7).to_string(), "-7");
        assert_eq!(Value::ratio(13, 4).to_string(), "13/4");
        assert_eq!(Value::ratio(-1, 2).to_string(), "-1/2");
    }

    #[test]
    fn test_display_nested_pairs() {
        let value = Value::pair(
            Value::int(1),
            Value::pair(Value::Null, Value::pair(Value::int(2), Value::int(3))),
        );
        assert_eq!(value.to_string(), "(1, (null, (2, 3)))");
        assert_eq!(format!("{:?}", value), "Pair(1, (null, (2, 3)))");
    }
}
