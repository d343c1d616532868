use gcode_minifier::parser::parse_line;
use gcode_minifier::{MachineState, Minifier, MinifierConfig};

fn main() {
    println!("=== Parser ===");

    let test_lines = [
        "G1 X10 Y20.5 Z0.2 ; linear move",
        "M104 S200 ; set temperature",
        "; another comment",
        "",
        "G28 ; home all axes",
        "G1 Xoops",
    ];

    for line in test_lines {
        println!("\nInput: '{}'", line);
        match parse_line(line) {
            Ok(parsed) => println!("Parsed: {:?}", parsed),
            Err(e) => println!("Error: {}", e),
        }
    }

    println!("\n=== Minifier ===");

    let input = "G28 ; home\nM83\nM104 S200\nG0 X0.000 Y0.000 F6000.0\nG1 X10.000 Y0.000 E0.50000 F1800.0\nG1 X10.000 Y10.000 E0.50000 F1800.0\nG1 X10.0004 Y10.000 E0.00000\n";
    println!("\nInput:\n{}", input);

    match Minifier::new(MinifierConfig::permissive()).minify(MachineState::default(), input) {
        Ok(result) => {
            println!("Output:\n{}", result.output);
            println!("Final state: {:?}", result.state);
            println!(
                "Saved {} of {} bytes",
                input.len() - result.output.len(),
                input.len()
            );
        }
        Err(e) => println!("Error: {}", e),
    }
}
