use crate::{encode::write_literal, OutParam, Param, Result, Value};

/// Composed stored procedure call: SQL text plus the output targets awaiting
/// their session variables, in parameter order.
pub struct CallPlan<'a> {
    text: String,
    outputs: Vec<&'a mut dyn OutParam>,
}

impl<'a> CallPlan<'a> {
    /// Builds the call text for `procedure` and collects output targets.
    ///
    /// Fails on the first parameter without a literal form.
    pub fn build(procedure: &str, params: Vec<Param<'a>>) -> Result<Self> {
        let text = compose_call(procedure, params.iter().map(as_input))?;
        let outputs = params
            .into_iter()
            .filter_map(|param| match param {
                Param::Out(target) => Some(target),
                Param::In(_) => None,
            })
            .collect();
        Ok(Self { text, outputs })
    }

    /// SQL sent to the server.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of output parameters, i.e. session variables `@1..@k`.
    pub fn output_count(&self) -> usize {
        self.outputs.len()
    }

    pub(crate) fn into_parts(self) -> (String, Vec<&'a mut dyn OutParam>) {
        (self.text, self.outputs)
    }
}

impl std::fmt::Debug for CallPlan<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallPlan")
            .field("text", &self.text)
            .field("outputs", &self.outputs.len())
            .finish()
    }
}

/// Returns the SQL that [`call`](crate::call) would send for these
/// parameters, without executing anything.
pub fn call_string(procedure: &str, params: &[Param<'_>]) -> Result<String> {
    compose_call(procedure, params.iter().map(as_input))
}

fn as_input<'p>(param: &'p Param<'_>) -> Option<&'p Value> {
    match param {
        Param::In(value) => Some(value),
        Param::Out(_) => None,
    }
}

/// Writes `CALL proc(args)` and, when any argument is an output (`None`),
/// the trailing `;SELECT @1,...,@k`.
fn compose_call<'v>(
    procedure: &str,
    args: impl Iterator<Item = Option<&'v Value>>,
) -> Result<String> {
    let mut buf = String::with_capacity(procedure.len() + 16);
    let mut outputs = 0usize;

    buf.push_str("CALL ");
    buf.push_str(procedure);
    buf.push('(');

    for (position, arg) in args.enumerate() {
        if position > 0 {
            buf.push(',');
        }
        match arg {
            Some(value) => write_literal(&mut buf, value, position)?,
            None => {
                outputs += 1;
                buf.push('@');
                buf.push_str(&outputs.to_string());
            }
        }
    }

    buf.push(')');
    if outputs > 0 {
        buf.push_str(";SELECT ");
        for slot in 1..=outputs {
            if slot > 1 {
                buf.push(',');
            }
            buf.push('@');
            buf.push_str(&slot.to_string());
        }
    }

    Ok(buf)
}
