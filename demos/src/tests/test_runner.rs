use std::io::{self, Write};

use aupa::prelude::*;

use super::{
    audio_file::*, bessel::*, flag::*, focus::*, group::*, plane::*, stm::*, transtest::*,
};

pub fn run<L: Link>(mut aupa: Controller<L>) -> anyhow::Result<()> {
    type Test<L> = (&'static str, fn(&mut Controller<L>) -> anyhow::Result<bool>);

    println!("======== firmware information ========");
    aupa.firmware_infos()?.iter().for_each(|info| {
        println!("{}", info);
    });
    println!("======================================");

    aupa.send(Clear::new())?;
    aupa.send(Synchronize::new())?;

    let mut examples: Vec<Test<_>> = vec![
        ("Single focus test", |aupa| focus(aupa)),
        ("Bessel beam test", |aupa| bessel(aupa)),
        ("Plane wave test", |aupa| plane(aupa)),
        ("Wav modulation test", |aupa| audio_file(aupa)),
        ("FocusSTM test", |aupa| focus_stm(aupa)),
        ("GainSTM test", |aupa| gain_stm(aupa)),
        ("Flag test", |aupa| flag(aupa)),
        ("TransducerTest test", |aupa| transtest(aupa)),
        ("Group (by Transducer) test", |aupa| group_by_transducer(aupa)),
    ];
    if aupa.geometry().num_devices() >= 2 {
        examples.push(("Group (by Device) test", |aupa| group_by_device(aupa)));
    }

    loop {
        examples.iter().enumerate().for_each(|(i, (name, _))| {
            println!("[{}]: {}", i, name);
        });
        println!("[Others]: Finish");
        print!("Choose number: ");
        io::stdout().flush()?;

        let mut s = String::new();
        io::stdin().read_line(&mut s)?;
        match s.trim().parse::<usize>() {
            Ok(i) if i < examples.len() => {
                if !(examples[i].1)(&mut aupa)? {
                    println!("Failed to send data");
                }
            }
            _ => break,
        }

        println!("press any key to finish...");
        let mut _s = String::new();
        io::stdin().read_line(&mut _s)?;

        aupa.send(Stop::new())?;
    }

    aupa.close()?;

    Ok(())
}
