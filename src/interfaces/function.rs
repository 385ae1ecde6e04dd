use crate::application::run::run;
use crate::domain::function::{FunctionRunResult, RunInput};
use crate::error::Result;
use std::io::{Read, Write};

/// Reads the checkout function input document from a JSON source.
pub fn read_input<R: Read>(source: R) -> Result<RunInput> {
    Ok(serde_json::from_reader(source)?)
}

/// Writes the function result as a single JSON document followed by a newline.
pub fn write_result<W: Write>(mut sink: W, result: &FunctionRunResult) -> Result<()> {
    serde_json::to_writer(&mut sink, result)?;
    writeln!(sink)?;
    sink.flush()?;
    Ok(())
}

/// Runs the function over one input document, the way the platform invokes it.
pub fn execute<R: Read, W: Write>(source: R, sink: W) -> Result<FunctionRunResult> {
    let input = read_input(source)?;
    let result = run(&input)?;
    write_result(sink, &result)?;
    Ok(result)
}
