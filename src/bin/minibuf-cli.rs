use std::fs::File;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use minibuf::Stream;

#[derive(clap::Parser, Debug)]
#[command(name = "minibuf-cli", version, about = "Encode and inspect minibuf byte streams")]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// put <path> <field>...: encode typed fields into a file.
    /// Fields are `type=value` tokens, e.g. `u32=42 string=hello bool=true`.
    /// `string=null` writes the absent sentinel instead of text.
    Put {
        /// Output file (created or truncated)
        path: PathBuf,
        /// Fields to encode, in wire order
        #[arg(required = true)]
        fields: Vec<String>,
    },
    /// dump <path> <type>...: decode a file against a field-type layout and
    /// print one value per line. The layout must mirror what was written;
    /// the wire carries no schema to check it against.
    Dump {
        /// Input file
        path: PathBuf,
        /// Field types in wire order: bool i8 u8 i16 u16 i32 u32 i64 u64 f32 f64 string
        #[arg(required = true)]
        layout: Vec<String>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.cmd {
        Cmd::Put { path, fields } => cmd_put(path, fields)?,
        Cmd::Dump { path, layout } => cmd_dump(path, layout)?,
    }

    Ok(())
}

fn cmd_put(path: PathBuf, fields: Vec<String>) -> Result<(), Box<dyn std::error::Error>> {
    let mut file = File::create(&path)?;
    let mut stream = Stream::new(&mut file);

    for field in &fields {
        let (ty, value) = field
            .split_once('=')
            .ok_or_else(|| format!("field `{field}` is not of the form type=value"))?;
        match ty {
            "bool" => stream.write(value.parse::<bool>()?)?,
            "i8" => stream.write(value.parse::<i8>()?)?,
            "u8" => stream.write(value.parse::<u8>()?)?,
            "i16" => stream.write(value.parse::<i16>()?)?,
            "u16" => stream.write(value.parse::<u16>()?)?,
            "i32" => stream.write(value.parse::<i32>()?)?,
            "u32" => stream.write(value.parse::<u32>()?)?,
            "i64" => stream.write(value.parse::<i64>()?)?,
            "u64" => stream.write(value.parse::<u64>()?)?,
            "f32" => stream.write(value.parse::<f32>()?)?,
            "f64" => stream.write(value.parse::<f64>()?)?,
            "string" if value == "null" => stream.write_opt_str(None)?,
            "string" => stream.write_str(value)?,
            other => return Err(format!("unknown field type `{other}`").into()),
        }
    }
    stream.flush()?;
    drop(stream);

    println!(
        "wrote {} field(s), {} byte(s) -> {}",
        fields.len(),
        file.metadata()?.len(),
        path.display()
    );
    Ok(())
}

fn cmd_dump(path: PathBuf, layout: Vec<String>) -> Result<(), Box<dyn std::error::Error>> {
    let mut file = File::open(&path)?;
    let mut stream = Stream::new(&mut file);

    for ty in &layout {
        match ty.as_str() {
            "bool" => println!("bool\t{}", stream.read::<bool>()?),
            "i8" => println!("i8\t{}", stream.read::<i8>()?),
            "u8" => println!("u8\t{}", stream.read::<u8>()?),
            "i16" => println!("i16\t{}", stream.read::<i16>()?),
            "u16" => println!("u16\t{}", stream.read::<u16>()?),
            "i32" => println!("i32\t{}", stream.read::<i32>()?),
            "u32" => println!("u32\t{}", stream.read::<u32>()?),
            "i64" => println!("i64\t{}", stream.read::<i64>()?),
            "u64" => println!("u64\t{}", stream.read::<u64>()?),
            "f32" => println!("f32\t{}", stream.read::<f32>()?),
            "f64" => println!("f64\t{}", stream.read::<f64>()?),
            "string" => match stream.read_opt_string()? {
                Some(text) => println!("string\t{text:?}"),
                None => println!("string\tnull"),
            },
            other => return Err(format!("unknown field type `{other}`").into()),
        }
    }

    Ok(())
}
