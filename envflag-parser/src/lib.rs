#![no_std]

/*!
Low-level tokenizing of command-line flags. Takes care of distinguishing
flags, `name=value` options, and positional arguments, using the single-dash
grammar where `-name` and `--name` mean the same thing. No type handling
happens here; usually this is too low level to use directly.
*/

mod arg;

use core::marker::PhantomData;

pub use arg::Arg;

/**
The [`ArgumentsParser`] type operates by passing the tokens it finds into a
[`Visitor`], to be handled.
 */
pub trait Visitor<'arg> {
    type Value;

    /// A positional argument. Once one has been seen, every argument that
    /// follows it is positional as well.
    fn visit_positional(self, argument: &'arg Arg) -> Self::Value;

    /// A flag that definitely has an argument, because it was given as
    /// `-name=argument` or `--name=argument`
    fn visit_option(self, name: &'arg Arg, argument: &'arg Arg) -> Self::Value;

    /// A flag given without an attached argument, such as `-name`. Flags that
    /// need a value can get it from the next command-line argument with
    /// [`ArgAccess::take`].
    fn visit_flag(self, name: &'arg Arg, argument: impl ArgAccess<'arg>) -> Self::Value;

    /// A token that starts with a dash but can't be a flag, like `---name`
    /// or `-=value`.
    fn visit_malformed(self, argument: &'arg Arg) -> Self::Value;
}

/**
[`ArgAccess`] allows a visitor to decide if a given flag needs an argument,
based on the identity of the flag.

Consider `-verbose input.txt`. Is this a flag followed by the positional
argument `input.txt`, or a single option that takes `input.txt` as its value?
The [`ArgumentsParser`] can't classify this independently, so a visitor
requests the argument via this trait only for flags that need one.
*/
pub trait ArgAccess<'arg>: Sized {
    /**
    Get an argument from the parser. This should only be called by flags that
    need a value; boolean flags should simply ignore it, to ensure that the
    next command line argument is parsed independently.

    The next argument is returned as-is, even if it looks like a flag or is
    `--`. This returns [`None`] if all of the arguments have been exhausted.
    */
    fn take(self) -> Option<&'arg Arg>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Ready,
    PositionalOnly,
}

/**
An `ArgumentsParser` is the main entry point into `envflag_parser`. It parses
one token in each call to `next_arg`, sending it to the given [`Visitor`].

Flag parsing ends at the first non-flag argument (which includes a lone `-`)
or at a `--` terminator; the terminator itself is consumed and never reaches
the visitor. Everything after that is delivered as positional arguments.

The parser operates entirely on borrowed data, because command-line arguments
are loaded once early on and then handled in borrowed form. The `'arg`
lifetime refers to this borrowed command line data.
*/
#[derive(Debug, Clone)]
pub struct ArgumentsParser<'arg, I> {
    state: State,
    args: I,
    lifetime: PhantomData<&'arg [u8]>,
}

impl<'arg, I> ArgumentsParser<'arg, I>
where
    I: Iterator<Item = &'arg [u8]>,
{
    /**
    Create a new [`ArgumentsParser`] from an iterator of byte slices, where
    each byte slice is a single argument received from the command line. This
    list should *exclude* the name of the program.
     */
    #[inline]
    #[must_use]
    pub fn new(args: impl IntoIterator<IntoIter = I>) -> Self {
        Self {
            state: State::Ready,
            args: args.into_iter(),
            lifetime: PhantomData,
        }
    }

    /// True once flag parsing has ended and only positionals remain
    #[inline]
    #[must_use]
    pub fn positional_only(&self) -> bool {
        self.state == State::PositionalOnly
    }

    /// Put `self` into a `PositionalOnly` state, then process the next
    /// argument as a positional
    #[inline]
    fn positional_only_arg<V>(&mut self, visitor: V) -> Option<V::Value>
    where
        V: Visitor<'arg>,
    {
        self.state = State::PositionalOnly;
        self.args
            .next()
            .map(|arg| visitor.visit_positional(Arg::new(arg)))
    }

    pub fn next_arg<V>(&mut self, visitor: V) -> Option<V::Value>
    where
        V: Visitor<'arg>,
    {
        if self.state == State::PositionalOnly {
            return self.positional_only_arg(visitor);
        }

        let argument = self.args.next()?;

        let name = match argument {
            b"--" => return self.positional_only_arg(visitor),
            [b'-', b'-', name @ ..] | [b'-', name @ ..] if !name.is_empty() => name,
            positional => {
                self.state = State::PositionalOnly;
                return Some(visitor.visit_positional(Arg::new(positional)));
            }
        };

        Some(match name {
            [b'-' | b'=', ..] => visitor.visit_malformed(Arg::new(argument)),
            name => match split_once(name, b'=') {
                Some((name, value)) => visitor.visit_option(Arg::new(name), Arg::new(value)),
                None => visitor.visit_flag(Arg::new(name), StandardArgAccess { parent: self }),
            },
        })
    }
}

/// ArgAccess implementation that takes the next argument from the list.
struct StandardArgAccess<'a, 'arg, I> {
    parent: &'a mut ArgumentsParser<'arg, I>,
}

impl<'arg, I> ArgAccess<'arg> for StandardArgAccess<'_, 'arg, I>
where
    I: Iterator<Item = &'arg [u8]>,
{
    #[inline]
    fn take(self) -> Option<&'arg Arg> {
        self.parent.args.next().map(Arg::new)
    }
}

fn split_once(input: &[u8], delimiter: u8) -> Option<(&[u8], &[u8])> {
    memchr::memchr(delimiter, input).map(|i| (&input[..i], &input[i + 1..]))
}
